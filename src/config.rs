//! Analyzer configuration.
//!
//! # Environment Variables
//!
//! - `PWD_ANALYSIS_TIMEOUT_MS`: per-password timeout in milliseconds (default 5000)
//! - `PWD_ANALYSIS_MAX_WORKERS`: maximum passwords scored at once (default: CPU count)
//! - `PWD_BLACKLIST_PATH`: optional file extending the common-password list

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const TIMEOUT_ENV: &str = "PWD_ANALYSIS_TIMEOUT_MS";
pub const MAX_WORKERS_ENV: &str = "PWD_ANALYSIS_MAX_WORKERS";
pub const BLACKLIST_PATH_ENV: &str = "PWD_BLACKLIST_PATH";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Budget for scoring a single password.
    pub timeout: Duration,
    /// Upper bound on concurrently running scoring tasks. Always at least 1.
    pub max_concurrency: usize,
    /// File with extra common passwords.
    pub blacklist_path: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_concurrency: default_concurrency(),
            blacklist_path: None,
        }
    }
}

impl AnalyzerConfig {
    /// Builds a configuration from defaults overridden by environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric variable does not parse
    /// or is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ms) = read_positive(TIMEOUT_ENV)? {
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(workers) = read_positive(MAX_WORKERS_ENV)? {
            config.max_concurrency = workers as usize;
        }
        config.blacklist_path = std::env::var_os(BLACKLIST_PATH_ENV).map(PathBuf::from);

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    pub fn with_blacklist_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.blacklist_path = Some(path.into());
        self
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn read_positive(var: &'static str) -> Result<Option<u64>, ConfigError> {
    let Ok(raw) = std::env::var(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(v) if v > 0 => Ok(Some(v)),
        _ => Err(ConfigError::InvalidValue { var, value: raw }),
    }
}
