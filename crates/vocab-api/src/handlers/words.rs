//! Word CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use vocab_core::entities::Word;
use vocab_core::enums::Familiarity;
use vocab_db::drafts::WordDraft;
use vocab_db::filter::{SearchCondition, SearchFilter};

use crate::error::ApiError;
use crate::server::AppState;

use super::{DEFAULT_LIMIT, ListResponse};

#[derive(Deserialize)]
pub struct ListWordsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Exact familiarity match (`red`, `yellow`, `green`).
    pub familiarity: Option<String>,
    /// Substring match on the word text.
    pub word: Option<String>,
}

#[derive(Serialize)]
pub struct CountResponse {
    pub count: u64,
}

/// Parse a familiarity query value, rejecting unknown levels with a 400.
pub(crate) fn parse_familiarity(value: &str) -> Result<Familiarity, ApiError> {
    match value {
        "red" => Ok(Familiarity::Red),
        "yellow" => Ok(Familiarity::Yellow),
        "green" => Ok(Familiarity::Green),
        other => Err(ApiError::bad_request(format!(
            "unknown familiarity level: {other}"
        ))),
    }
}

fn words_filter(query: &ListWordsQuery) -> Result<SearchFilter, ApiError> {
    let mut conditions = Vec::new();
    if let Some(familiarity) = query.familiarity.as_deref() {
        let level = parse_familiarity(familiarity)?;
        conditions.push(SearchCondition::eq("familiarity", level.as_str()));
    }
    if let Some(word) = query.word.as_deref() {
        conditions.push(SearchCondition::like("word", format!("%{word}%")));
    }
    Ok(SearchFilter::all(conditions))
}

pub async fn insert_word(
    State(state): State<AppState>,
    Json(draft): Json<WordDraft>,
) -> Result<(StatusCode, Json<Word>), ApiError> {
    if draft.word.trim().is_empty() {
        return Err(ApiError::bad_request("word text must not be empty"));
    }
    let word = state.db.insert_word(draft).await?;
    Ok((StatusCode::CREATED, Json(word)))
}

pub async fn list_words(
    State(state): State<AppState>,
    Query(query): Query<ListWordsQuery>,
) -> Result<Json<ListResponse<Word>>, ApiError> {
    let filter = words_filter(&query)?;
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let items = state.db.select_words(&filter, limit, offset).await?;
    let total = state.db.count_words(&filter).await?;
    Ok(Json(ListResponse { items, total }))
}

pub async fn count_words(
    State(state): State<AppState>,
    Query(query): Query<ListWordsQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let filter = words_filter(&query)?;
    let count = state.db.count_words(&filter).await?;
    Ok(Json(CountResponse { count }))
}

pub async fn get_word(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Word>, ApiError> {
    Ok(Json(state.db.select_word_by_id(&id).await?))
}

pub async fn update_word(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<WordDraft>,
) -> Result<Json<Word>, ApiError> {
    if draft.word.trim().is_empty() {
        return Err(ApiError::bad_request("word text must not be empty"));
    }
    Ok(Json(state.db.update_word(&id, draft).await?))
}

pub async fn delete_word(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.db.delete_word(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
