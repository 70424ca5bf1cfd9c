//! Shared test utilities for vocab-db tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::collections::BTreeMap;

    use crate::VocabDb;
    use crate::drafts::{DefinitionDraft, QuestionDraft, WordDraft};

    /// Create an in-memory database with the full schema applied.
    pub async fn test_db() -> VocabDb {
        VocabDb::open_local(":memory:").await.unwrap()
    }

    /// A word draft with `n` simple definitions.
    pub fn word_draft(word: &str, n: usize) -> WordDraft {
        WordDraft {
            word: word.to_string(),
            familiarity: None,
            definitions: (0..n)
                .map(|i| DefinitionDraft {
                    part_of_speech: Some("noun".to_string()),
                    definition: format!("{word} sense {i}"),
                    examples: vec![format!("Example {i} for {word}.")],
                    phonetics: BTreeMap::from([(
                        "us".to_string(),
                        format!("https://audio.example/{word}-{i}.mp3"),
                    )]),
                    notes: None,
                })
                .collect(),
        }
    }

    /// A minimal two-option question draft.
    pub fn question_draft(text: &str) -> QuestionDraft {
        QuestionDraft {
            question: text.to_string(),
            answer: "a".to_string(),
            option_a: "right".to_string(),
            option_b: Some("wrong".to_string()),
            option_c: None,
            option_d: None,
            notes: None,
            reference: None,
        }
    }
}
