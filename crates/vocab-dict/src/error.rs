//! Lookup error types.
//!
//! Every failure kind stays distinguishable to the HTTP boundary: not-found
//! and validation map to 4xx there, the rest to 5xx.

use thiserror::Error;

/// Errors that can occur when looking up a word.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The input word was empty or malformed; rejected before any I/O.
    #[error("invalid word: {0}")]
    Validation(String),

    /// The upstream service does not know the word (HTTP 404).
    #[error("word not found")]
    NotFound,

    /// The upstream service answered with a non-success status other than 404.
    #[error("dictionary service error ({status}): {message}")]
    Upstream {
        /// HTTP status code returned upstream.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Transport-level failure reaching the upstream service (includes the
    /// request timeout).
    #[error("failed to reach dictionary service: {0}")]
    Connectivity(#[from] reqwest::Error),

    /// The upstream payload did not parse into the expected shape.
    #[error("unexpected upstream payload: {0}")]
    Transform(String),
}
