use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::Familiarity;

/// A learnable word with its definition set.
///
/// Owns its definitions exclusively: the repository writes and removes them
/// in the same transaction as the word row, and the schema cascades deletes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Word {
    pub id: String,
    pub word: String,
    pub familiarity: Familiarity,
    pub definitions: Vec<WordDefinition>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One sense of a word: part of speech, definition text, examples, and
/// per-accent audio URLs.
///
/// `word_id` is a back-reference only; the parent [`Word`] owns the row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordDefinition {
    pub id: String,
    pub word_id: String,
    pub part_of_speech: Option<String>,
    pub definition: String,
    /// Example sentences, in stored order.
    pub examples: Vec<String>,
    /// Accent → audio URL (e.g. `"us"` → `"https://.../hello-us.mp3"`).
    pub phonetics: BTreeMap<String, String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
