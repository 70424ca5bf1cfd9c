//! Entity ID prefix constants.
//!
//! All rows use prefixed random-hex IDs of the form `wrd-a3f8b2c1`,
//! generated in SQL by `VocabDb::generate_id`.

/// Prefix for word IDs.
pub const PREFIX_WORD: &str = "wrd";

/// Prefix for word definition IDs.
pub const PREFIX_DEFINITION: &str = "def";

/// Prefix for question IDs.
pub const PREFIX_QUESTION: &str = "qst";

/// All known prefixes, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_WORD, PREFIX_DEFINITION, PREFIX_QUESTION];
