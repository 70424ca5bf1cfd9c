//! Upstream dictionary service configuration.
//!
//! The upstream port is selectable with a single environment variable,
//! `VOCAB_DICTIONARY__PORT`, defaulting to 8081 when unset.

use serde::{Deserialize, Serialize};

const fn default_port() -> u16 {
    8081
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

/// 30 minutes.
const fn default_cache_ttl_secs() -> u64 {
    30 * 60
}

const fn default_cache_max_entries() -> usize {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DictionaryConfig {
    /// Host of the upstream dictionary service.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port of the upstream dictionary service.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout for upstream calls, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long a cached lookup stays fresh, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Entry count past which the cache sweeps expired entries on write.
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,
}

impl DictionaryConfig {
    /// Base URL of the upstream service, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_contract() {
        let config = DictionaryConfig::default();
        assert_eq!(config.port, 8081);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.cache_ttl_secs, 1800);
        assert_eq!(config.cache_max_entries, 1000);
    }

    #[test]
    fn base_url_joins_host_and_port() {
        let config = DictionaryConfig {
            host: "dict.internal".to_string(),
            port: 9000,
            ..DictionaryConfig::default()
        };
        assert_eq!(config.base_url(), "http://dict.internal:9000");
    }
}
