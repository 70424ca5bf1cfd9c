//! Learning-progress enum for words.
//!
//! Uses `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! matching the TEXT values stored in SQL.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Familiarity level of a word: how well the learner knows it.
///
/// New words start at `Red` and graduate through `Yellow` to `Green`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Familiarity {
    #[default]
    Red,
    Yellow,
    Green,
}

impl Familiarity {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }
}

impl fmt::Display for Familiarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
