//! Per-item failures of a batch evaluation.

use std::time::Duration;
use thiserror::Error;

/// Why a single record could not be analyzed.
///
/// None of these abort a batch; each is attached to the failing record's
/// outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Password analysis timeout after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("Password analysis cancelled")]
    Cancelled,
    #[error("Password analysis failed: {0}")]
    Panicked(String),
    #[error("Password analysis task lost")]
    TaskLost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = AnalysisError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "Password analysis timeout after 5000ms");
    }

    #[test]
    fn test_panicked_message() {
        let err = AnalysisError::Panicked("boom".to_string());
        assert_eq!(err.to_string(), "Password analysis failed: boom");
    }
}
