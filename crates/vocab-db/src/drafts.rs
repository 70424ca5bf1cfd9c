//! Draft (insert/update input) types for the repositories.
//!
//! A draft carries everything the caller chooses; the repository fills in
//! generated IDs and timestamps. `update_word` consumes the same draft shape
//! as `insert_word` because updates fully replace the definition set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vocab_core::enums::Familiarity;

/// Input for inserting or updating a word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordDraft {
    pub word: String,
    /// Defaults to [`Familiarity::Red`] when unset.
    #[serde(default)]
    pub familiarity: Option<Familiarity>,
    #[serde(default)]
    pub definitions: Vec<DefinitionDraft>,
}

/// Input for one definition row, owned by a [`WordDraft`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionDraft {
    #[serde(default)]
    pub part_of_speech: Option<String>,
    pub definition: String,
    #[serde(default)]
    pub examples: Vec<String>,
    /// Accent → audio URL.
    #[serde(default)]
    pub phonetics: BTreeMap<String, String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Input for inserting or updating a question.
///
/// Practice counters are absent on purpose: they start at zero and are only
/// mutated by `record_question_practice`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question: String,
    pub answer: String,
    pub option_a: String,
    #[serde(default)]
    pub option_b: Option<String>,
    #[serde(default)]
    pub option_c: Option<String>,
    #[serde(default)]
    pub option_d: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
}
