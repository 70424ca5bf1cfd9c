//! Quiz sampling handlers.
//!
//! Both endpoints return up to `count` random entities; fewer matches than
//! requested returns all of them, so the item count is a lower-bound hint.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use vocab_core::entities::{Question, Word};
use vocab_db::filter::{SearchCondition, SearchFilter};

use crate::error::ApiError;
use crate::server::AppState;

use super::words::parse_familiarity;

/// Default quiz size.
const DEFAULT_COUNT: u32 = 10;

#[derive(Deserialize)]
pub struct QuizWordsQuery {
    pub count: Option<u32>,
    /// Comma-separated familiarity levels, e.g. `red,yellow`.
    pub familiarity: Option<String>,
}

#[derive(Deserialize)]
pub struct QuizQuestionsQuery {
    pub count: Option<u32>,
}

pub async fn quiz_words(
    State(state): State<AppState>,
    Query(query): Query<QuizWordsQuery>,
) -> Result<Json<Vec<Word>>, ApiError> {
    let filter = match query.familiarity.as_deref() {
        Some(levels) => {
            let mut conditions = Vec::new();
            for level in levels.split(',') {
                let familiarity = parse_familiarity(level.trim())?;
                conditions.push(SearchCondition::eq("familiarity", familiarity.as_str()));
            }
            SearchFilter::any(conditions)
        }
        None => SearchFilter::empty(),
    };

    let count = query.count.unwrap_or(DEFAULT_COUNT);
    Ok(Json(state.db.sample_words(count, &filter).await?))
}

pub async fn quiz_questions(
    State(state): State<AppState>,
    Query(query): Query<QuizQuestionsQuery>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let count = query.count.unwrap_or(DEFAULT_COUNT);
    Ok(Json(
        state.db.sample_questions(count, &SearchFilter::empty()).await?,
    ))
}
