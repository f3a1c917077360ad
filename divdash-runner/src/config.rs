//! Serializable pipeline configuration.
//!
//! Every key is optional; an empty file (or no file at all) reproduces the
//! stock job: the built-in dividend universe, a 200 ms pause between
//! tickers, top 30 by yield, 60 dividend payments of history, output in the
//! working directory.

use divdash_core::data::{Universe, DEFAULT_BASE_URL, DEFAULT_SESSION_URL};
use divdash_core::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::partition::DEFAULT_TOP_YIELD_LIMIT;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory the JSON views are written to.
    pub output_dir: PathBuf,
    /// Fixed pause between tickers, in milliseconds.
    pub request_pause_ms: u64,
    /// Size of the top-yield view.
    pub top_yield_limit: usize,
    /// Dividend payments kept per ticker in the simulator view.
    pub dividend_history_limit: usize,
    /// Print a progress line every this many tickers.
    pub progress_every: usize,
    /// Data provider API host.
    pub base_url: String,
    /// Host that issues the anonymous session cookie.
    pub session_url: String,
    pub universe: Universe,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            request_pause_ms: 200,
            top_yield_limit: DEFAULT_TOP_YIELD_LIMIT,
            dividend_history_limit: DEFAULT_HISTORY_LIMIT,
            progress_every: 10,
            base_url: DEFAULT_BASE_URL.to_string(),
            session_url: DEFAULT_SESSION_URL.to_string(),
            universe: Universe::default_dividend(),
        }
    }
}

impl PipelineConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validated()
    }

    /// Normalize the universe and reject settings the pipeline cannot honor.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.universe = self.universe.normalized();
        if self.universe.is_empty() {
            return Err(ConfigError::Invalid("universe has no tickers".into()));
        }
        if self.top_yield_limit == 0 {
            return Err(ConfigError::Invalid("top_yield_limit must be > 0".into()));
        }
        if self.progress_every == 0 {
            return Err(ConfigError::Invalid("progress_every must be > 0".into()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".into()));
        }
        if self.session_url.trim().is_empty() {
            return Err(ConfigError::Invalid("session_url must not be empty".into()));
        }
        Ok(self)
    }

    pub fn request_pause(&self) -> Duration {
        Duration::from_millis(self.request_pause_ms)
    }
}
