//! Entropy and brute-force crack time estimation.

/// Assumed offline attack speed.
pub const GUESSES_PER_SECOND: f64 = 10_000_000_000.0;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const MONTH: f64 = 2_592_000.0;
const YEAR: f64 = 31_536_000.0;

/// Bits of entropy of a password of `length` characters drawn from `charset_size` symbols.
///
/// Zero when either is zero.
pub fn entropy_bits(charset_size: u32, length: usize) -> f64 {
    if charset_size == 0 || length == 0 {
        return 0.0;
    }
    length as f64 * f64::from(charset_size).log2()
}

/// Seconds needed on average to brute-force a keyspace of `2^entropy` candidates.
pub fn crack_seconds(entropy: f64) -> f64 {
    entropy.exp2() / 2.0 / GUESSES_PER_SECOND
}

/// Human-readable crack time in the coarsest fitting unit.
pub fn crack_time_estimate(entropy: f64) -> String {
    let seconds = crack_seconds(entropy);

    if seconds < MINUTE {
        return "Instant".to_string();
    }
    let (unit, label) = if seconds < HOUR {
        (MINUTE, "minutes")
    } else if seconds < DAY {
        (HOUR, "hours")
    } else if seconds < MONTH {
        (DAY, "days")
    } else if seconds < YEAR {
        (MONTH, "months")
    } else {
        (YEAR, "years")
    };
    // `as` saturates, so astronomically large estimates stay printable
    format!("{} {}", (seconds / unit).ceil() as u128, label)
}
