//! Raw payload shapes of the upstream dictionary service.
//!
//! `GET /api/dictionary/en-tw/{word}` responds with these. Every field is
//! defaulted: the upstream omits keys freely, and a missing list must not
//! fail the whole lookup.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpstreamWord {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub pos: Vec<String>,
    #[serde(default)]
    pub pronunciation: Vec<UpstreamPronunciation>,
    #[serde(default)]
    pub definition: Vec<UpstreamDefinition>,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamPronunciation {
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pron: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamDefinition {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub example: Vec<UpstreamExample>,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamExample {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
}

/// Shared fixture mirroring a real upstream response, used by the parser and
/// transform tests.
#[cfg(test)]
pub(crate) const FIXTURE: &str = r#"{
        "word": "hello",
        "pos": ["noun", "exclamation"],
        "pronunciation": [
            {"pos": "noun", "lang": "us", "url": "https://audio.example/hello-us.mp3", "pron": "heh-LOH"},
            {"pos": "exclamation", "lang": "us", "url": "https://audio.example/hello-us.mp3", "pron": "huh-LOH"},
            {"pos": "noun", "lang": "uk", "url": "https://audio.example/hello-uk.mp3", "pron": "hə-ˈləʊ"}
        ],
        "definition": [
            {"id": 1, "pos": "noun", "text": "a greeting", "translation": "問候",
             "example": [{"id": 10, "text": "she gave him a warm hello", "translation": "她熱情地向他問好"}]},
            {"id": 2, "pos": "exclamation", "text": "used as a greeting", "translation": "喂",
             "example": []},
            {"id": 3, "pos": "noun", "text": "an utterance of hello"}
        ]
    }"#;
