//! Filter translation: a generic condition list into a parameterized SQL
//! predicate.
//!
//! Every condition becomes one `column op ?N` fragment; fragments are joined
//! by the filter's logic operator (AND/OR across the whole list, no nested
//! grouping). Column names are validated against a per-entity allowlist and
//! unknown columns fail closed; values are always bound parameters, never
//! spliced into query text.

use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;

/// Columns the word repository accepts in filters.
pub const WORD_COLUMNS: &[&str] = &["id", "word", "familiarity", "created_at", "updated_at"];

/// Columns the question repository accepts in filters.
pub const QUESTION_COLUMNS: &[&str] = &[
    "id",
    "question",
    "answer",
    "notes",
    "reference",
    "count_practise",
    "count_failure_practise",
];

/// Comparison operator of a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOp {
    Eq,
    Ne,
    Like,
    Lt,
    Le,
    Gt,
    Ge,
}

impl SearchOp {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Like => "LIKE",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

/// How the conditions of a filter combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterLogic {
    #[default]
    And,
    Or,
}

impl FilterLogic {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// A bound condition value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<FilterValue> for libsql::Value {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Text(s) => s.into(),
            FilterValue::Integer(n) => n.into(),
        }
    }
}

/// One `(column, operator, value)` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCondition {
    pub column: String,
    pub op: SearchOp,
    pub value: FilterValue,
}

impl SearchCondition {
    pub fn new(column: impl Into<String>, op: SearchOp, value: impl Into<FilterValue>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// Shorthand for an equality condition.
    pub fn eq(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(column, SearchOp::Eq, value)
    }

    /// Shorthand for a LIKE condition.
    pub fn like(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(column, SearchOp::Like, value)
    }
}

/// An ordered condition list plus its combining logic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub conditions: Vec<SearchCondition>,
    #[serde(default)]
    pub logic: FilterLogic,
}

impl SearchFilter {
    /// A filter matching every row.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// All conditions must hold (AND).
    #[must_use]
    pub fn all(conditions: Vec<SearchCondition>) -> Self {
        Self {
            conditions,
            logic: FilterLogic::And,
        }
    }

    /// Any condition may hold (OR).
    #[must_use]
    pub fn any(conditions: Vec<SearchCondition>) -> Self {
        Self {
            conditions,
            logic: FilterLogic::Or,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Translate a filter into `(predicate SQL, ordered parameters)`.
///
/// Parameter placeholders start at `?{start_index}` so callers can bind
/// their own parameters before or after the filter's. An empty filter
/// yields an empty predicate and no parameters.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidFilter` if any condition names a column
/// outside `allowlist`.
pub fn build_predicate(
    filter: &SearchFilter,
    allowlist: &[&str],
    start_index: usize,
) -> Result<(String, Vec<libsql::Value>), DatabaseError> {
    let mut fragments = Vec::with_capacity(filter.conditions.len());
    let mut params = Vec::with_capacity(filter.conditions.len());

    for (offset, condition) in filter.conditions.iter().enumerate() {
        if !allowlist.contains(&condition.column.as_str()) {
            return Err(DatabaseError::InvalidFilter(condition.column.clone()));
        }
        let idx = start_index + offset;
        fragments.push(format!(
            "{} {} ?{idx}",
            condition.column,
            condition.op.as_sql()
        ));
        params.push(condition.value.clone().into());
    }

    let joiner = format!(" {} ", filter.logic.as_sql());
    Ok((fragments.join(&joiner), params))
}

/// Like [`build_predicate`], but prefixed with `WHERE ` when non-empty, so
/// repos can splice the result directly into a statement.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidFilter` for non-allowlisted columns.
pub(crate) fn where_clause(
    filter: &SearchFilter,
    allowlist: &[&str],
    start_index: usize,
) -> Result<(String, Vec<libsql::Value>), DatabaseError> {
    let (predicate, params) = build_predicate(filter, allowlist, start_index)?;
    if predicate.is_empty() {
        Ok((String::new(), params))
    } else {
        Ok((format!("WHERE {predicate} "), params))
    }
}
