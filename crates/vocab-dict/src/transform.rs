//! Upstream payload → [`WordLookup`] transformation.
//!
//! Three rules, all order-preserving:
//! - pronunciations collapse to one phonetic record per (language, audio URL)
//!   pair, first occurrence wins;
//! - definitions group into one meaning block per part-of-speech tag
//!   (`"unknown"` when absent), tags in first-encountered order;
//! - definition and example strings are capitalized, and when both a
//!   translation and a source text exist they are joined:
//!   translation-before-text for definitions, text-before-translation for
//!   examples. The asymmetry is a fixed contract of the transformation.

use crate::upstream::{UpstreamDefinition, UpstreamExample, UpstreamPronunciation, UpstreamWord};
use crate::{Meaning, MeaningDefinition, Phonetic, WordLookup};

/// Part-of-speech tag used when the upstream entry carries none.
const UNKNOWN_POS: &str = "unknown";

pub(crate) fn transform(raw: UpstreamWord) -> WordLookup {
    WordLookup {
        phonetics: dedup_phonetics(raw.pronunciation),
        meanings: group_meanings(raw.definition),
    }
}

fn dedup_phonetics(pronunciations: Vec<UpstreamPronunciation>) -> Vec<Phonetic> {
    let mut phonetics: Vec<Phonetic> = Vec::new();
    for entry in pronunciations {
        let language = entry.lang.unwrap_or_default();
        let audio = entry.url.unwrap_or_default();
        let seen = phonetics
            .iter()
            .any(|p| p.language == language && p.audio == audio);
        if !seen {
            phonetics.push(Phonetic { language, audio });
        }
    }
    phonetics
}

fn group_meanings(definitions: Vec<UpstreamDefinition>) -> Vec<Meaning> {
    let mut meanings: Vec<Meaning> = Vec::new();
    for entry in definitions {
        let tag = entry
            .pos
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| UNKNOWN_POS.to_string());
        let definition = MeaningDefinition {
            definition: compose_definition(&entry),
            example: entry.example.iter().map(compose_example).collect(),
        };
        match meanings.iter_mut().find(|m| m.part_of_speech == tag) {
            Some(meaning) => meaning.definitions.push(definition),
            None => meanings.push(Meaning {
                part_of_speech: tag,
                definitions: vec![definition],
            }),
        }
    }
    meanings
}

/// Translation-before-text, then capitalized.
fn compose_definition(entry: &UpstreamDefinition) -> String {
    let composed = join_pair(entry.translation.as_deref(), entry.text.as_deref());
    capitalize(&composed)
}

/// Text-before-translation, then capitalized. Note the reversed order
/// relative to definitions.
fn compose_example(example: &UpstreamExample) -> String {
    let composed = join_pair(example.text.as_deref(), example.translation.as_deref());
    capitalize(&composed)
}

fn join_pair(first: Option<&str>, second: Option<&str>) -> String {
    match (first, second) {
        (Some(a), Some(b)) => format!("{a} {b}"),
        (Some(a), None) => a.to_string(),
        (None, Some(b)) => b.to_string(),
        (None, None) => String::new(),
    }
}

/// Uppercase the first character, leaving the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
