//! Shared data model: input records, strength reports and batch outcomes.

use std::fmt;

use secrecy::SecretString;
use serde::Serialize;

use crate::error::AnalysisError;

/// Strength band derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl Strength {
    /// Maps a clamped score to its band.
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Strength::VeryStrong,
            60..=79 => Strength::Strong,
            40..=59 => Strength::Medium,
            20..=39 => Strength::Weak,
            _ => Strength::VeryWeak,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::VeryWeak => "very_weak",
            Strength::Weak => "weak",
            Strength::Medium => "medium",
            Strength::Strong => "strong",
            Strength::VeryStrong => "very_strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored password entry handed to the batch evaluator.
///
/// `index` is assigned by the caller and only used to correlate outcomes.
/// The payload stays wrapped so it never shows up in `Debug` output.
#[derive(Debug, Clone)]
pub struct PasswordRecord {
    pub index: usize,
    pub service: String,
    pub payload: SecretString,
}

impl PasswordRecord {
    pub fn new(index: usize, service: impl Into<String>, payload: impl Into<String>) -> Self {
        let payload: String = payload.into();
        Self {
            index,
            service: service.into(),
            payload: SecretString::from(payload),
        }
    }
}

/// Full analysis of a single password.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthReport {
    pub length: usize,
    pub score: u8,
    pub strength: Strength,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_numbers: bool,
    pub has_special_chars: bool,
    pub has_repeating: bool,
    pub has_sequential: bool,
    pub is_common: bool,
    pub entropy_bits: f64,
    pub crack_time_estimate: String,
    pub suggestions: Vec<String>,
}

/// Result of analyzing one record of a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AnalysisOutcome {
    Success {
        index: usize,
        service: String,
        report: StrengthReport,
    },
    Failure {
        index: usize,
        service: String,
        #[serde(serialize_with = "serialize_error")]
        error: AnalysisError,
    },
}

impl AnalysisOutcome {
    pub fn index(&self) -> usize {
        match self {
            AnalysisOutcome::Success { index, .. } | AnalysisOutcome::Failure { index, .. } => {
                *index
            }
        }
    }

    pub fn service(&self) -> &str {
        match self {
            AnalysisOutcome::Success { service, .. } | AnalysisOutcome::Failure { service, .. } => {
                service
            }
        }
    }

    pub fn report(&self) -> Option<&StrengthReport> {
        match self {
            AnalysisOutcome::Success { report, .. } => Some(report),
            AnalysisOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            AnalysisOutcome::Success { .. } => None,
            AnalysisOutcome::Failure { error, .. } => Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisOutcome::Success { .. })
    }
}

fn serialize_error<S: serde::Serializer>(error: &AnalysisError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_bands() {
        assert_eq!(Strength::from_score(0), Strength::VeryWeak);
        assert_eq!(Strength::from_score(19), Strength::VeryWeak);
        assert_eq!(Strength::from_score(20), Strength::Weak);
        assert_eq!(Strength::from_score(40), Strength::Medium);
        assert_eq!(Strength::from_score(60), Strength::Strong);
        assert_eq!(Strength::from_score(79), Strength::Strong);
        assert_eq!(Strength::from_score(80), Strength::VeryStrong);
        assert_eq!(Strength::from_score(100), Strength::VeryStrong);
    }

    #[test]
    fn test_strength_ordering() {
        assert!(Strength::VeryWeak < Strength::Weak);
        assert!(Strength::Strong < Strength::VeryStrong);
    }

    #[test]
    fn test_record_debug_hides_payload() {
        let record = PasswordRecord::new(0, "mail", "hunter2");
        let debug = format!("{:?}", record);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("mail"));
    }

    #[test]
    fn test_failure_outcome_serializes_message() {
        let outcome = AnalysisOutcome::Failure {
            index: 3,
            service: "bank".to_string(),
            error: AnalysisError::Cancelled,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["index"], 3);
        assert_eq!(json["error"], "Password analysis cancelled");
    }
}
