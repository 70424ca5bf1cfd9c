//! Route handlers, grouped by resource.

pub mod dictionary;
pub mod questions;
pub mod quiz;
pub mod words;

use serde::Serialize;

/// Paginated list envelope: the page items plus the unpaginated total, so
/// clients can render pagination controls from one response.
#[derive(Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Default page size when the query string does not specify one.
pub const DEFAULT_LIMIT: u32 = 20;
