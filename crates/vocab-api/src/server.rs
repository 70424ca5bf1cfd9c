//! Router construction and the serve loop.
//!
//! # Endpoints
//!
//! | Method   | Path                          | Description                     |
//! |----------|-------------------------------|---------------------------------|
//! | `GET`    | `/api/health`                 | Health check (empty body)       |
//! | `GET`    | `/api/dictionary/{word}`      | Cached dictionary lookup        |
//! | `POST`   | `/api/words`                  | Insert a word + definitions     |
//! | `GET`    | `/api/words`                  | List/filter/paginate words      |
//! | `GET`    | `/api/words/count`            | Count matching words            |
//! | `GET`    | `/api/words/{id}`             | Fetch one word                  |
//! | `PUT`    | `/api/words/{id}`             | Replace a word + definitions    |
//! | `DELETE` | `/api/words/{id}`             | Delete a word + definitions     |
//! | `POST`   | `/api/questions`              | Insert a question               |
//! | `GET`    | `/api/questions`              | List/filter/paginate questions  |
//! | `GET`    | `/api/questions/{id}`         | Fetch one question              |
//! | `PUT`    | `/api/questions/{id}`         | Update a question               |
//! | `DELETE` | `/api/questions/{id}`         | Delete a question               |
//! | `POST`   | `/api/questions/{id}/practice`| Record a practice attempt       |
//! | `GET`    | `/api/quiz/words`             | Sample random words             |
//! | `GET`    | `/api/quiz/questions`         | Sample random questions         |
//!
//! All origins/methods/headers are permitted via CORS so browser-based
//! clients can call the API directly.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use vocab_config::VocabConfig;
use vocab_db::VocabDb;
use vocab_dict::DictionaryClient;

use crate::handlers::{dictionary, questions, quiz, words};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<VocabDb>,
    pub dict: Arc<DictionaryClient>,
}

/// Build the full application router over `state`.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/dictionary", get(dictionary::missing_word))
        .route("/api/dictionary/{word}", get(dictionary::lookup_word))
        .route(
            "/api/dictionary/{word}/{*rest}",
            get(dictionary::extra_segments),
        )
        .route("/api/words", post(words::insert_word).get(words::list_words))
        .route("/api/words/count", get(words::count_words))
        .route(
            "/api/words/{id}",
            get(words::get_word)
                .put(words::update_word)
                .delete(words::delete_word),
        )
        .route(
            "/api/questions",
            post(questions::insert_question).get(questions::list_questions),
        )
        .route(
            "/api/questions/{id}",
            get(questions::get_question)
                .put(questions::update_question)
                .delete(questions::delete_question),
        )
        .route(
            "/api/questions/{id}/practice",
            post(questions::record_practice),
        )
        .route("/api/quiz/words", get(quiz::quiz_words))
        .route("/api/quiz/questions", get(quiz::quiz_questions))
        .layer(cors)
        .with_state(state)
}

/// `GET /api/health` — 200 with an empty body.
async fn handle_health() -> StatusCode {
    StatusCode::OK
}

/// Open the database, build the lookup client, and serve until terminated.
///
/// The database open is fail-fast: a connection failure here aborts startup
/// rather than limping along without storage.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the bind fails.
pub async fn run_server(config: &VocabConfig) -> anyhow::Result<()> {
    let db = VocabDb::open_local(&config.database.path).await?;
    let dict = DictionaryClient::with_settings(
        config.dictionary.base_url(),
        Duration::from_secs(config.dictionary.timeout_secs),
        Duration::from_secs(config.dictionary.cache_ttl_secs),
        config.dictionary.cache_max_entries,
    );

    let state = AppState {
        db: Arc::new(db),
        dict: Arc::new(dict),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, upstream = %config.dictionary.base_url(), "vocab API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
