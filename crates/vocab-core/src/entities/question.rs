use serde::{Deserialize, Serialize};

/// A multiple-choice quiz question.
///
/// `option_a` is always present; the remaining options are optional so
/// two- and three-option questions are representable. The practice counters
/// satisfy `count_failure_practise <= count_practise` and only ever grow;
/// both are mutated solely by the practice-recording operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub question: String,
    /// Which option is correct (e.g. `"a"`).
    pub answer: String,
    pub option_a: String,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub notes: Option<String>,
    /// Source reference (book, URL, lesson).
    pub reference: Option<String>,
    pub count_practise: u32,
    pub count_failure_practise: u32,
}
