//! `GET /api/dictionary/{word}` — the lookup proxy's HTTP face.

use axum::Json;
use axum::extract::{Path, State};

use vocab_dict::WordLookup;

use crate::error::ApiError;
use crate::server::AppState;

pub async fn lookup_word(
    State(state): State<AppState>,
    Path(word): Path<String>,
) -> Result<Json<WordLookup>, ApiError> {
    Ok(Json(state.dict.lookup(&word).await?))
}

/// `/api/dictionary` with no word segment.
pub async fn missing_word() -> ApiError {
    ApiError::bad_request("word segment is required")
}

/// `/api/dictionary/{word}/...` with extra segments.
pub async fn extra_segments() -> ApiError {
    ApiError::bad_request("unexpected extra path segments")
}
