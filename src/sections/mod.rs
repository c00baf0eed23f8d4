//! Password evaluation sections
//!
//! Each section inspects one aspect of the decoded password and reports the
//! facts and rubric points it contributes.

mod blacklist;
mod length;
mod pattern;
mod variety;

pub use blacklist::{blacklist_section, COMMON_PENALTY};
pub use length::{length_section, RECOMMENDED_LENGTH};
pub use pattern::{pattern_analysis_section, PatternAnalysis};
pub use variety::{character_variety_section, CharacterClasses};
