//! Exponential backoff with jitter.

use rand::Rng;
use std::time::Duration;

use crate::config::RetryConfig;

/// Delay before the next attempt, given how many attempts have failed.
///
/// Doubles from `base_delay_ms`, capped at `max_delay_ms`, plus up to 10%
/// jitter. No delay before the first attempt.
pub fn backoff_delay(failed_attempts: u32, config: &RetryConfig) -> Duration {
    let Some(doublings) = failed_attempts.checked_sub(1) else {
        return Duration::ZERO;
    };

    let factor = 1u64.checked_shl(doublings).unwrap_or(u64::MAX);
    let delay_ms = config
        .base_delay_ms
        .saturating_mul(factor)
        .min(config.max_delay_ms);

    let jitter_ms = match delay_ms / 10 {
        0 => 0,
        spread => rand::thread_rng().gen_range(0..spread),
    };

    Duration::from_millis(delay_ms + jitter_ms)
}
