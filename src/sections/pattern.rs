//! Pattern analysis section - detects repetitive and sequential patterns.

use secrecy::{ExposeSecret, SecretString};

pub const REPEATING_PENALTY: i32 = -10;
pub const SEQUENTIAL_PENALTY: i32 = -10;

/// Reference sequences whose 3-character windows count as sequential.
const SEQUENCES: [&str; 5] = [
    "abcdefghijklmnopqrstuvwxyz",
    "0123456789",
    "qwertyuiop",
    "asdfghjkl",
    "zxcvbnm",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternAnalysis {
    pub repeating: bool,
    pub sequential: bool,
}

impl PatternAnalysis {
    pub fn points(&self) -> i32 {
        let mut points = 0;
        if self.repeating {
            points += REPEATING_PENALTY;
        }
        if self.sequential {
            points += SEQUENTIAL_PENALTY;
        }
        points
    }
}

/// Analyzes password for repetitive and sequential patterns.
pub fn pattern_analysis_section(password: &SecretString) -> PatternAnalysis {
    let pwd = password.expose_secret();
    PatternAnalysis {
        repeating: has_repeating(pwd),
        sequential: has_sequential(pwd),
    }
}

/// Any character occurring 3 or more times in a row (e.g. "aaa").
pub fn has_repeating(pwd: &str) -> bool {
    let mut run = 0;
    let mut prev = None;
    for c in pwd.chars() {
        if prev == Some(c) {
            run += 1;
            if run >= 3 {
                return true;
            }
        } else {
            run = 1;
            prev = Some(c);
        }
    }
    false
}

/// Any 3-character window of a reference sequence, compared case-insensitively.
pub fn has_sequential(pwd: &str) -> bool {
    let lowered = pwd.to_lowercase();
    SEQUENCES.iter().any(|seq| {
        // reference sequences are ASCII, so byte windows are char windows
        (0..=seq.len() - 3).any(|i| lowered.contains(&seq[i..i + 3]))
    })
}
