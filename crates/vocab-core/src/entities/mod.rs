//! Entity structs for the vocab domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize` and `Deserialize` for JSON roundtrip at the HTTP boundary.

mod question;
mod word;

pub use question::Question;
pub use word::{Word, WordDefinition};
