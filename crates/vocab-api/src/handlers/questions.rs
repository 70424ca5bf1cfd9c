//! Question CRUD and practice-recording handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use vocab_core::entities::Question;
use vocab_db::drafts::QuestionDraft;
use vocab_db::filter::{SearchCondition, SearchFilter};

use crate::error::ApiError;
use crate::server::AppState;

use super::{DEFAULT_LIMIT, ListResponse};

#[derive(Deserialize)]
pub struct ListQuestionsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Substring match on the question text.
    pub question: Option<String>,
}

#[derive(Deserialize)]
pub struct PracticeBody {
    /// Whether this attempt was answered incorrectly.
    #[serde(default)]
    pub failed: bool,
}

fn questions_filter(query: &ListQuestionsQuery) -> SearchFilter {
    let mut conditions = Vec::new();
    if let Some(question) = query.question.as_deref() {
        conditions.push(SearchCondition::like("question", format!("%{question}%")));
    }
    SearchFilter::all(conditions)
}

pub async fn insert_question(
    State(state): State<AppState>,
    Json(draft): Json<QuestionDraft>,
) -> Result<(StatusCode, Json<Question>), ApiError> {
    if draft.question.trim().is_empty() || draft.option_a.trim().is_empty() {
        return Err(ApiError::bad_request(
            "question text and the first option are required",
        ));
    }
    let question = state.db.insert_question(draft).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<ListQuestionsQuery>,
) -> Result<Json<ListResponse<Question>>, ApiError> {
    let filter = questions_filter(&query);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let items = state.db.select_questions(&filter, limit, offset).await?;
    let total = state.db.count_questions(&filter).await?;
    Ok(Json(ListResponse { items, total }))
}

pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Question>, ApiError> {
    Ok(Json(state.db.select_question_by_id(&id).await?))
}

pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<QuestionDraft>,
) -> Result<Json<Question>, ApiError> {
    if draft.question.trim().is_empty() || draft.option_a.trim().is_empty() {
        return Err(ApiError::bad_request(
            "question text and the first option are required",
        ));
    }
    Ok(Json(state.db.update_question(&id, draft).await?))
}

pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.db.delete_question(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn record_practice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<PracticeBody>,
) -> Result<Json<Question>, ApiError> {
    Ok(Json(
        state.db.record_question_practice(&id, body.failed).await?,
    ))
}
