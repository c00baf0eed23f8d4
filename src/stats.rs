//! Vault-wide security statistics built from batch outcomes.

use std::fmt;

use serde::Serialize;

use crate::types::AnalysisOutcome;

const NO_PASSWORDS: &str = "No passwords to analyze";
const NONE_ANALYZED: &str = "No passwords could be analyzed; try again later";

/// Letter grade for a vault's average score.
///
/// `NotAvailable` when nothing could be scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SecurityGrade {
    #[serde(rename = "N/A")]
    NotAvailable,
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl SecurityGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            SecurityGrade::APlus
        } else if score >= 80.0 {
            SecurityGrade::A
        } else if score >= 70.0 {
            SecurityGrade::B
        } else if score >= 60.0 {
            SecurityGrade::C
        } else if score >= 50.0 {
            SecurityGrade::D
        } else {
            SecurityGrade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityGrade::NotAvailable => "N/A",
            SecurityGrade::APlus => "A+",
            SecurityGrade::A => "A",
            SecurityGrade::B => "B",
            SecurityGrade::C => "C",
            SecurityGrade::D => "D",
            SecurityGrade::F => "F",
        }
    }
}

impl fmt::Display for SecurityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts over the successfully analyzed records of a batch.
///
/// Score bands: weak `< 40`, medium `40..60`, strong `60..80`, very strong `>= 80`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityStats {
    pub total: usize,
    pub analyzed: usize,
    pub failed: usize,
    pub average_score: f64,
    pub weak_passwords: usize,
    pub medium_passwords: usize,
    pub strong_passwords: usize,
    pub very_strong_passwords: usize,
    pub common_passwords: usize,
    pub repeating_patterns: usize,
    pub sequential_patterns: usize,
}

impl SecurityStats {
    pub fn from_outcomes(outcomes: &[AnalysisOutcome]) -> Self {
        let mut stats = SecurityStats {
            total: outcomes.len(),
            ..Default::default()
        };
        let mut sum = 0u64;

        for report in outcomes.iter().filter_map(AnalysisOutcome::report) {
            stats.analyzed += 1;
            sum += u64::from(report.score);

            match report.score {
                0..=39 => stats.weak_passwords += 1,
                40..=59 => stats.medium_passwords += 1,
                60..=79 => stats.strong_passwords += 1,
                _ => stats.very_strong_passwords += 1,
            }
            if report.is_common {
                stats.common_passwords += 1;
            }
            if report.has_repeating {
                stats.repeating_patterns += 1;
            }
            if report.has_sequential {
                stats.sequential_patterns += 1;
            }
        }

        stats.failed = stats.total - stats.analyzed;
        if stats.analyzed > 0 {
            stats.average_score = sum as f64 / stats.analyzed as f64;
        }
        stats
    }

    pub fn grade(&self) -> SecurityGrade {
        if self.analyzed == 0 {
            return SecurityGrade::NotAvailable;
        }
        SecurityGrade::from_score(self.average_score)
    }

    /// Vault-level advice, most urgent first. Never empty.
    pub fn recommendations(&self) -> Vec<String> {
        if self.total == 0 {
            return vec![NO_PASSWORDS.to_string()];
        }
        if self.analyzed == 0 {
            return vec![NONE_ANALYZED.to_string()];
        }

        let mut out = Vec::new();

        if self.weak_passwords > 0 {
            out.push(format!(
                "Update {} weak password(s) to improve security",
                self.weak_passwords
            ));
        }
        if self.common_passwords > 0 {
            out.push(format!(
                "Replace {} common password(s) with unique ones",
                self.common_passwords
            ));
        }
        if self.repeating_patterns > 0 {
            out.push("Avoid using repeating characters in passwords".to_string());
        }
        if self.sequential_patterns > 0 {
            out.push("Avoid using sequential patterns (abc, 123)".to_string());
        }

        if out.is_empty() {
            out.push("Your passwords are secure! Keep up the good work.".to_string());
        }
        out
    }

    pub fn summary(&self) -> SecuritySummary {
        SecuritySummary {
            score: self.average_score.round() as u8,
            grade: self.grade(),
            total_passwords: self.total,
            weak_passwords: self.weak_passwords,
            strong_passwords: self.strong_passwords,
            recommendations: self.recommendations(),
        }
    }
}

/// Headline figures for a vault.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySummary {
    pub score: u8,
    pub grade: SecurityGrade,
    pub total_passwords: usize,
    pub weak_passwords: usize,
    pub strong_passwords: usize,
    pub recommendations: Vec<String>,
}
