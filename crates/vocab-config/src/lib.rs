//! # vocab-config
//!
//! Layered configuration loading for the vocab backend using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VOCAB_*` prefix, `__` as separator)
//! 2. Project-level `.vocab/config.toml`
//! 3. User-level `~/.config/vocab/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VOCAB_DICTIONARY__PORT` -> `dictionary.port`,
//! `VOCAB_DATABASE__PATH` -> `database.path`, etc. The `__` (double
//! underscore) separates nested config sections. `VOCAB_DICTIONARY__PORT`
//! is the upstream-port override the lookup proxy consumes (default 8081).
//!
//! # Usage
//!
//! ```no_run
//! use vocab_config::VocabConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = VocabConfig::load_with_dotenv().expect("config");
//! println!("upstream: {}", config.dictionary.base_url());
//! ```

mod database;
mod dictionary;
mod error;
mod server;

pub use database::DatabaseConfig;
pub use dictionary::DictionaryConfig;
pub use error::ConfigError;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VocabConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl VocabConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`VocabConfig::load_with_dotenv`] if you
    /// need `.env` file loading.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`VOCAB_*` prefix)
    /// 2. `.vocab/config.toml` (project-local)
    /// 3. `~/.config/vocab/config.toml` (user-global)
    /// 4. Default values
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for the server
    /// binary and tests.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".vocab/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("VOCAB_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vocab").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}
