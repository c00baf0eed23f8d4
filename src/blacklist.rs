//! Common-password deny-list.
//!
//! A fixed built-in list of well-known weak passwords, optionally extended
//! with entries loaded from a file (one password per line).

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::AnalyzerConfig;

/// Passwords that are always treated as common.
pub const COMMON_PASSWORDS: &[&str] = &[
    "password", "123456", "12345678", "qwerty", "abc123",
    "monkey", "1234567", "letmein", "trustno1", "dragon",
    "baseball", "iloveyou", "master", "sunshine", "ashley",
];

#[derive(Error, Debug)]
pub enum BlacklistError {
    #[error("Blacklist file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read blacklist file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Blacklist file is empty")]
    EmptyFile,
}

/// Deny-list used for the exact, case-insensitive "common password" check.
///
/// The default value holds only [`COMMON_PASSWORDS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DenyList {
    extra: HashSet<String>,
}

impl DenyList {
    /// Built-in list only.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Built-in list plus the given entries.
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { extra }
    }

    /// Built-in list extended with the passwords in `path`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File is empty
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BlacklistError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Blacklist initialization FAILED: FileNotFound {}", path.display());
            return Err(BlacklistError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;

        if content.trim().is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Blacklist initialization FAILED: Empty file {}", path.display());
            return Err(BlacklistError::EmptyFile);
        }

        let list = Self::with_entries(content.lines());

        #[cfg(feature = "tracing")]
        tracing::info!("Blacklist loaded: {} extra passwords from {:?}", list.extra.len(), path);

        Ok(list)
    }

    /// Loads the extension file named by `config.blacklist_path`, if any.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, BlacklistError> {
        match &config.blacklist_path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Number of entries, built-in ones included.
    pub fn len(&self) -> usize {
        COMMON_PASSWORDS.len()
            + self
                .extra
                .iter()
                .filter(|e| !COMMON_PASSWORDS.contains(&e.as_str()))
                .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `password` matches an entry exactly, ignoring case.
    pub fn contains(&self, password: &str) -> bool {
        let lowered = password.to_lowercase();
        COMMON_PASSWORDS.contains(&lowered.as_str()) || self.extra.contains(&lowered)
    }
}
