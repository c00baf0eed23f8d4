//! Password strength analysis for password vaults
//!
//! This library scores stored vault entries with a fixed, deterministic
//! rubric and evaluates whole vaults in parallel.
//!
//! # Features
//!
//! - `async` (default): Enables parallel batch evaluation and background scanning
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_ANALYSIS_TIMEOUT_MS`: per-password analysis timeout (default: 5000)
//! - `PWD_ANALYSIS_MAX_WORKERS`: concurrently scored passwords (default: CPU count)
//! - `PWD_BLACKLIST_PATH`: file with extra common passwords, one per line
//!
//! # Example
//!
//! ```rust
//! use vault_strength::{score_password, Strength};
//!
//! // Payloads may be base64-encoded; plain text works too
//! let report = score_password("TXlQQHNzdzByZCE=");
//!
//! assert_eq!(report.length, 11);
//! assert_eq!(report.strength, Strength::VeryStrong);
//! println!("Crack time: {}", report.crack_time_estimate);
//! ```
//!
//! Whole vaults are scored concurrently, one outcome per record in input order:
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! # async fn run() {
//! use vault_strength::{evaluate_batch, PasswordRecord, SecurityStats};
//!
//! let records = vec![
//!     PasswordRecord::new(0, "mail", "password"),
//!     PasswordRecord::new(1, "bank", "TXlQQHNzdzByZCE="),
//! ];
//! let outcomes = evaluate_batch(records).await;
//! let stats = SecurityStats::from_outcomes(&outcomes);
//! println!("Grade: {}", stats.grade());
//! # }
//! ```

// Internal modules
mod blacklist;
mod config;
mod decode;
mod entropy;
mod error;
mod evaluator;
mod sections;
mod stats;
mod types;

#[cfg(feature = "async")]
mod batch;
#[cfg(feature = "async")]
mod scanner;

// Public API
pub use blacklist::{BlacklistError, DenyList, COMMON_PASSWORDS};
pub use config::{AnalyzerConfig, ConfigError, DEFAULT_TIMEOUT};
pub use decode::decode_payload;
pub use entropy::{crack_time_estimate, entropy_bits, GUESSES_PER_SECOND};
pub use error::AnalysisError;
pub use evaluator::{
    evaluate_password_strength, score_password, score_password_with, Scorer, StrengthScorer,
};
pub use stats::{SecurityGrade, SecurityStats, SecuritySummary};
pub use types::{AnalysisOutcome, PasswordRecord, Strength, StrengthReport};

#[cfg(feature = "async")]
pub use batch::{evaluate_batch, BatchEvaluator};
#[cfg(feature = "async")]
pub use scanner::{RecordSource, ScanEvent, ScanRegistry, ScanSettings, ScanStatus, SecurityAlert};
