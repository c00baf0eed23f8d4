//! Password strength evaluator - main scoring logic.

use secrecy::SecretString;

use crate::blacklist::{BlacklistError, DenyList};
use crate::config::AnalyzerConfig;
use crate::decode::decode_payload;
use crate::entropy::{crack_time_estimate, entropy_bits};
use crate::sections::{
    blacklist_section, character_variety_section, length_section, pattern_analysis_section,
    CharacterClasses, PatternAnalysis, COMMON_PENALTY, RECOMMENDED_LENGTH,
};
use crate::types::{Strength, StrengthReport};

const EXCELLENT: &str = "Excellent password strength!";

/// Something that turns a stored payload into a strength report.
///
/// Implementations must be pure: the batch evaluator may call them from any
/// worker thread, in any order.
pub trait Scorer: Send + Sync + 'static {
    fn score(&self, payload: &str) -> StrengthReport;
}

impl<F> Scorer for F
where
    F: Fn(&str) -> StrengthReport + Send + Sync + 'static,
{
    fn score(&self, payload: &str) -> StrengthReport {
        self(payload)
    }
}

/// The standard rubric with a configurable deny-list.
#[derive(Debug, Clone, Default)]
pub struct StrengthScorer {
    deny_list: DenyList,
}

impl StrengthScorer {
    pub fn new(deny_list: DenyList) -> Self {
        Self { deny_list }
    }

    /// Scorer using the deny-list file named in `config`, if any.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, BlacklistError> {
        Ok(Self::new(DenyList::from_config(config)?))
    }

    pub fn deny_list(&self) -> &DenyList {
        &self.deny_list
    }
}

impl Scorer for StrengthScorer {
    fn score(&self, payload: &str) -> StrengthReport {
        score_password_with(payload, &self.deny_list)
    }
}

/// Scores a stored payload against the built-in deny-list.
///
/// The payload is base64-decoded when it holds encoded text and analyzed
/// as-is otherwise. Total over all inputs: `""` yields score 0, `very_weak`.
///
/// ```
/// use vault_strength::{score_password, Strength};
///
/// let report = score_password("password");
/// assert!(report.is_common);
/// assert_eq!(report.strength, Strength::VeryWeak);
/// ```
pub fn score_password(payload: &str) -> StrengthReport {
    score_password_with(payload, &DenyList::builtin())
}

/// Same as [`score_password`] with a caller-supplied deny-list.
pub fn score_password_with(payload: &str, deny_list: &DenyList) -> StrengthReport {
    let password = decode_payload(payload);
    evaluate_password_strength(&password, deny_list)
}

/// Runs every section over an already decoded password and builds the report.
pub fn evaluate_password_strength(password: &SecretString, deny_list: &DenyList) -> StrengthReport {
    let length = length_section(password);
    let classes = character_variety_section(password);
    let patterns = pattern_analysis_section(password);
    let is_common = blacklist_section(password, deny_list);

    let mut total = length.points + classes.points() + patterns.points();
    if is_common {
        total += COMMON_PENALTY;
    }
    let score = total.clamp(0, 100) as u8;

    let entropy = entropy_bits(classes.charset_size(), length.length);

    StrengthReport {
        length: length.length,
        score,
        strength: Strength::from_score(score),
        has_uppercase: classes.uppercase,
        has_lowercase: classes.lowercase,
        has_numbers: classes.digits,
        has_special_chars: classes.special,
        has_repeating: patterns.repeating,
        has_sequential: patterns.sequential,
        is_common,
        entropy_bits: entropy,
        crack_time_estimate: crack_time_estimate(entropy),
        suggestions: suggestions(length.length, &classes, &patterns, is_common),
    }
}

fn suggestions(
    length: usize,
    classes: &CharacterClasses,
    patterns: &PatternAnalysis,
    is_common: bool,
) -> Vec<String> {
    let checks = [
        (
            length < RECOMMENDED_LENGTH,
            "Increase password length to at least 12 characters",
        ),
        (!classes.uppercase, "Add uppercase letters"),
        (!classes.lowercase, "Add lowercase letters"),
        (!classes.digits, "Add numbers"),
        (!classes.special, "Add special characters (!@#$%^&*)"),
        (patterns.repeating, "Avoid repeating characters"),
        (patterns.sequential, "Avoid sequential patterns (abc, 123, qwerty)"),
        (
            is_common,
            "This is a commonly used password - choose something unique",
        ),
    ];

    let mut out: Vec<String> = checks
        .iter()
        .filter(|(applies, _)| *applies)
        .map(|(_, text)| text.to_string())
        .collect();

    if out.is_empty() {
        out.push(EXCELLENT.to_string());
    }
    out
}
