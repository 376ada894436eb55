//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CARTWHEEL_DATA_DIR` - Directory for persisted state (default: `.cartwheel`)
//! - `CARTWHEEL_CATALOG` - Path to a `.json`/`.yaml` catalog file
//! - `CARTWHEEL_SUGGESTION_LIMIT` - Suggestions shown while typing (default: 5)
//! - `CARTWHEEL_RECENT_SEARCH_LIMIT` - Recent searches remembered (default: 5)
//! - `CARTWHEEL_RECENTLY_VIEWED_LIMIT` - Recently viewed products remembered (default: 10)
//! - `CARTWHEEL_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::recently_viewed::DEFAULT_RECENTLY_VIEWED_LIMIT;
use crate::search::{DEFAULT_RECENT_SEARCH_LIMIT, DEFAULT_SUGGESTION_LIMIT};

const DEFAULT_DATA_DIR: &str = ".cartwheel";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory the file store writes to
    pub data_dir: PathBuf,
    /// Catalog file, if configured
    pub catalog_path: Option<PathBuf>,
    /// Number of suggestions returned while typing
    pub suggestion_limit: usize,
    /// Maximum length of the recent-search list
    pub recent_search_limit: usize,
    /// Maximum length of the recently-viewed list
    pub recently_viewed_limit: usize,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            recent_search_limit: DEFAULT_RECENT_SEARCH_LIMIT,
            recently_viewed_limit: DEFAULT_RECENTLY_VIEWED_LIMIT,
            log_format: LogFormat::Pretty,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("CARTWHEEL_DATA_DIR")
            .filter(|v| !v.is_empty())
            .map_or(defaults.data_dir, PathBuf::from);
        let catalog_path = lookup("CARTWHEEL_CATALOG")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let suggestion_limit = get_limit(
            &lookup,
            "CARTWHEEL_SUGGESTION_LIMIT",
            defaults.suggestion_limit,
        )?;
        let recent_search_limit = get_limit(
            &lookup,
            "CARTWHEEL_RECENT_SEARCH_LIMIT",
            defaults.recent_search_limit,
        )?;
        let recently_viewed_limit = get_limit(
            &lookup,
            "CARTWHEEL_RECENTLY_VIEWED_LIMIT",
            defaults.recently_viewed_limit,
        )?;
        let log_format = match lookup("CARTWHEEL_LOG_FORMAT") {
            Some(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("CARTWHEEL_LOG_FORMAT".to_string(), e))?,
            None => defaults.log_format,
        };

        Ok(Self {
            data_dir,
            catalog_path,
            suggestion_limit,
            recent_search_limit,
            recently_viewed_limit,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a positive list limit, falling back to `default` when unset.
fn get_limit<F>(lookup: &F, key: &str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(default);
    };
    let limit = value
        .trim()
        .parse::<usize>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if limit == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be at least 1".to_string(),
        ));
    }
    Ok(limit)
}
