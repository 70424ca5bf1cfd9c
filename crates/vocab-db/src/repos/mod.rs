//! Repositories, implemented as `impl VocabDb` blocks.
//!
//! - [`word`]: transactional word + definition persistence with batched
//!   definition retrieval.
//! - [`question`]: single-table question CRUD and practice recording.
//!
//! Both expose a `sample_*` method selecting up to N random rows for quiz
//! generation.

pub mod question;
pub mod word;
