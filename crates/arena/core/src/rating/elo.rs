//! ELO update math.

use crate::config::EngineConfig;

/// Probability that `rating` beats `opponent`.
///
/// # Formula
///
/// ```text
/// expected = 1 / (1 + 10^((opponent − rating) / 400))
/// ```
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf(f64::from(opponent - rating) / 400.0))
}

/// K-factor for a rating: full weight below the threshold, half above, so
/// established ladders move more slowly.
pub fn k_factor(rating: i32) -> f64 {
    if rating < EngineConfig::K_THRESHOLD {
        EngineConfig::K_STANDARD
    } else {
        EngineConfig::K_HIGH
    }
}

/// Signed rating change for the side that scored `actual` (1.0 win, 0.0
/// loss), rounded to the nearest integer.
pub fn rating_delta(rating: i32, opponent: i32, actual: f64) -> i32 {
    (k_factor(rating) * (actual - expected_score(rating, opponent))).round() as i32
}
