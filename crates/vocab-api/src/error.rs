//! HTTP error mapping.
//!
//! The core error taxonomy maps onto status codes here and nowhere else:
//! not-found and validation become 4xx, upstream-shaped failures become 502,
//! storage failures become 500.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use vocab_db::error::DatabaseError;
use vocab_dict::LookupError;

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Inner error detail with a machine-readable code and human-readable message.
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Error type every handler returns; converts into an HTTP response.
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "bad_request",
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "not_found",
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound => Self::not_found("no matching row"),
            DatabaseError::InvalidFilter(column) => {
                Self::bad_request(format!("filter column not allowed: {column}"))
            }
            other => {
                tracing::error!(%other, "storage failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "storage_error",
                    message: other.to_string(),
                }
            }
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Validation(message) => Self::bad_request(message),
            LookupError::NotFound => Self::not_found("word not found"),
            other => {
                tracing::warn!(%other, "dictionary lookup failed");
                let code = match other {
                    LookupError::Transform(_) => "transform_error",
                    _ => "upstream_error",
                };
                Self {
                    status: StatusCode::BAD_GATEWAY,
                    code,
                    message: other.to_string(),
                }
            }
        }
    }
}
