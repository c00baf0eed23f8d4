//! Length section - awards points for crossing length thresholds.

use secrecy::{ExposeSecret, SecretString};

/// Thresholds are cumulative: a 16-char password collects all three.
const LENGTH_TIERS: [(usize, i32); 3] = [(8, 20), (12, 10), (16, 10)];

/// Below this length a lengthening suggestion is emitted.
pub const RECOMMENDED_LENGTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthAnalysis {
    /// Length in characters, not bytes.
    pub length: usize,
    pub points: i32,
}

pub fn length_section(password: &SecretString) -> LengthAnalysis {
    let length = password.expose_secret().chars().count();
    let points = LENGTH_TIERS
        .iter()
        .filter(|(min, _)| length >= *min)
        .map(|(_, pts)| pts)
        .sum();
    LengthAnalysis { length, points }
}
