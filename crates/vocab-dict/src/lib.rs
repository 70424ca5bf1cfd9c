//! # vocab-dict
//!
//! Caching lookup proxy for the upstream dictionary service.
//!
//! A lookup runs: normalize (trim, reject empty) → cache check → on miss,
//! upstream `GET /api/dictionary/en-tw/{word}` with a bounded timeout →
//! parse → transform (pronunciation dedup, part-of-speech grouping, text
//! normalization) → cache the transformed result.
//!
//! Concurrent lookups for the same uncached word are coalesced: a per-word
//! in-flight guard lets one caller hit upstream while the rest wait and read
//! the freshly populated cache. Failures are not shared; a waiter whose
//! winner failed performs its own upstream call, so error semantics stay
//! per-request and nothing retries automatically.

pub mod cache;

mod error;
mod http;
mod transform;
mod upstream;

pub use error::LookupError;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use cache::TtlCache;

// ── Types ──────────────────────────────────────────────────────────

/// Transformed lookup result served to clients and stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordLookup {
    pub phonetics: Vec<Phonetic>,
    pub meanings: Vec<Meaning>,
}

/// One deduplicated pronunciation: accent/language plus its audio URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phonetic {
    pub language: String,
    pub audio: String,
}

/// All definitions sharing one part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    pub definitions: Vec<MeaningDefinition>,
}

/// A single normalized definition with its example sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeaningDefinition {
    pub definition: String,
    pub example: Vec<String>,
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the upstream dictionary service, with an owned TTL cache
/// and per-word request coalescing.
pub struct DictionaryClient {
    http: reqwest::Client,
    base_url: String,
    cache: TtlCache<WordLookup>,
    flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DictionaryClient {
    /// Create a client with the default settings: 10 s request timeout,
    /// 30 min cache TTL, 1000-entry sweep ceiling.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_settings(
            base_url,
            Duration::from_secs(10),
            Duration::from_secs(30 * 60),
            1000,
        )
    }

    /// Create a client with explicit timeout and cache settings.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn with_settings(
        base_url: impl Into<String>,
        timeout: Duration,
        cache_ttl: Duration,
        cache_max_entries: usize,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::builder()
                .user_agent("vocab/0.1")
                .timeout(timeout)
                .build()
                .expect("reqwest client should build"),
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: TtlCache::new(cache_ttl, cache_max_entries),
            flight: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a word, serving from the cache when fresh.
    ///
    /// # Errors
    ///
    /// - [`LookupError::Validation`] — empty input, rejected before any I/O
    /// - [`LookupError::NotFound`] — upstream does not know the word
    /// - [`LookupError::Upstream`] — non-success upstream status (not 404)
    /// - [`LookupError::Connectivity`] — transport failure or timeout
    /// - [`LookupError::Transform`] — upstream payload did not parse
    pub async fn lookup(&self, word: &str) -> Result<WordLookup, LookupError> {
        let key = word.trim();
        if key.is_empty() {
            return Err(LookupError::Validation("word must not be empty".into()));
        }

        if let Some(hit) = self.cache.get(key) {
            tracing::debug!(word = key, "lookup served from cache");
            return Ok(hit);
        }

        let guard = self.flight_guard(key).await;
        let _in_flight = guard.lock().await;

        // Another flight for this word may have landed while we waited.
        if let Some(hit) = self.cache.get(key) {
            tracing::debug!(word = key, "lookup coalesced into earlier flight");
            return Ok(hit);
        }

        let result = self.fetch_and_transform(key).await;
        if let Ok(ref transformed) = result {
            self.cache.set(key.to_string(), transformed.clone());
        }
        self.clear_flight(key).await;
        result
    }

    async fn fetch_and_transform(&self, word: &str) -> Result<WordLookup, LookupError> {
        let url = format!(
            "{}/api/dictionary/en-tw/{}",
            self.base_url,
            urlencoding::encode(word)
        );
        tracing::debug!(word, %url, "calling upstream dictionary");

        let resp = self.http.get(&url).send().await?;
        let resp = http::check_response(resp).await?;

        let body = resp.text().await?;
        let raw: upstream::UpstreamWord = serde_json::from_str(&body)
            .map_err(|e| LookupError::Transform(format!("payload did not parse: {e}")))?;
        Ok(transform::transform(raw))
    }

    /// Per-word coalescing guard. All concurrent misses for `key` share one
    /// `Arc` and queue on its mutex.
    async fn flight_guard(&self, key: &str) -> Arc<Mutex<()>> {
        let mut flights = self.flight.lock().await;
        Arc::clone(flights.entry(key.to_string()).or_default())
    }

    async fn clear_flight(&self, key: &str) {
        self.flight.lock().await.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BODY: &str = r#"{
        "word": "hello",
        "pronunciation": [
            {"lang": "us", "url": "https://audio.example/a.mp3", "pron": "x"},
            {"lang": "us", "url": "https://audio.example/a.mp3", "pron": "y"}
        ],
        "definition": [
            {"pos": "noun", "text": "a greeting", "translation": "問候", "example": []}
        ]
    }"#;

    /// Spawn a stub upstream on an ephemeral port. Returns its base URL and
    /// a counter of requests served.
    fn stub_upstream(
        status: u16,
        body: &'static str,
        delay: Duration,
    ) -> (String, Arc<AtomicUsize>) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                counter.fetch_add(1, Ordering::SeqCst);
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
                let response = tiny_http::Response::from_string(body).with_status_code(status);
                let _ = request.respond(response);
            }
        });

        (format!("http://{addr}"), hits)
    }

    #[tokio::test]
    async fn empty_word_rejected_before_any_io() {
        // Unroutable base URL: a request would fail loudly if one were made.
        let client = DictionaryClient::new("http://127.0.0.1:1");
        assert!(matches!(
            client.lookup("").await,
            Err(LookupError::Validation(_))
        ));
        assert!(matches!(
            client.lookup("   ").await,
            Err(LookupError::Validation(_))
        ));
        assert!(client.cache.is_empty());
    }

    #[tokio::test]
    async fn uncached_lookup_calls_upstream_once_then_caches() {
        let (base_url, hits) = stub_upstream(200, BODY, Duration::ZERO);
        let client = DictionaryClient::new(base_url);

        let first = client.lookup("hello").await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(first.phonetics.len(), 1, "pronunciations deduplicated");
        assert_eq!(first.meanings[0].definitions[0].definition, "問候 a greeting");

        let second = client.lookup("hello").await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1, "second lookup is a cache hit");
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn trimmed_input_shares_the_cache_key() {
        let (base_url, hits) = stub_upstream(200, BODY, Duration::ZERO);
        let client = DictionaryClient::new(base_url);

        client.lookup("  hello  ").await.unwrap();
        client.lookup("hello").await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_misses_coalesce_to_one_upstream_call() {
        let (base_url, hits) = stub_upstream(200, BODY, Duration::from_millis(100));
        let client = Arc::new(DictionaryClient::new(base_url));

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let client = Arc::clone(&client);
                tokio::spawn(async move { client.lookup("hello").await })
            })
            .collect();

        let mut results = Vec::new();
        for task in tasks {
            results.push(task.await.unwrap().unwrap());
        }

        assert_eq!(hits.load(Ordering::SeqCst), 1, "misses must coalesce");
        assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[tokio::test]
    async fn upstream_404_is_not_found_and_not_cached() {
        let (base_url, hits) = stub_upstream(404, "", Duration::ZERO);
        let client = DictionaryClient::new(base_url);

        assert!(matches!(
            client.lookup("ghost").await,
            Err(LookupError::NotFound)
        ));
        assert!(matches!(
            client.lookup("ghost").await,
            Err(LookupError::NotFound)
        ));
        assert_eq!(
            hits.load(Ordering::SeqCst),
            2,
            "failures are not cached, each call reaches upstream"
        );
        assert!(client.cache.is_empty());
    }

    #[tokio::test]
    async fn upstream_500_keeps_status_and_body() {
        let (base_url, _) = stub_upstream(500, "downstream exploded", Duration::ZERO);
        let client = DictionaryClient::new(base_url);

        match client.lookup("hello").await.unwrap_err() {
            LookupError::Upstream { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "downstream exploded");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_payload_is_transform_error() {
        let (base_url, _) = stub_upstream(200, "certainly not json", Duration::ZERO);
        let client = DictionaryClient::new(base_url);

        assert!(matches!(
            client.lookup("hello").await,
            Err(LookupError::Transform(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_connectivity_error() {
        let client = DictionaryClient::new("http://127.0.0.1:1");
        assert!(matches!(
            client.lookup("hello").await,
            Err(LookupError::Connectivity(_))
        ));
    }

    #[test]
    fn lookup_serializes_with_camel_case_part_of_speech() {
        let lookup = WordLookup {
            phonetics: vec![Phonetic {
                language: "us".to_string(),
                audio: "https://a.mp3".to_string(),
            }],
            meanings: vec![Meaning {
                part_of_speech: "noun".to_string(),
                definitions: vec![MeaningDefinition {
                    definition: "A greeting.".to_string(),
                    example: vec!["Hello there.".to_string()],
                }],
            }],
        };

        let json = serde_json::to_value(&lookup).unwrap();
        assert!(json["meanings"][0].get("partOfSpeech").is_some());
        assert_eq!(json["phonetics"][0]["language"], "us");
    }
}
