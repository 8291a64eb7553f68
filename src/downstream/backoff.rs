//! Exponential backoff with jitter for dial retries.

use std::time::Duration;

use rand::Rng;

/// Delay before retry number `attempt` (1-based), doubling from `base_ms`
/// up to `max_ms`, with up to 10% jitter added.
pub fn backoff_delay(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(attempt - 1);
    let delay_ms = base_ms.saturating_mul(exponential_base);
    let capped_delay = delay_ms.min(max_ms);

    let jitter_range = capped_delay / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_until_capped() {
        let b1 = backoff_delay(1, 25, 250);
        assert!(b1.as_millis() >= 25);

        let b2 = backoff_delay(2, 25, 250);
        assert!(b2.as_millis() >= 50);

        let capped = backoff_delay(10, 25, 250);
        assert!(capped.as_millis() >= 250);
        assert!(capped.as_millis() <= 275);
    }

    #[test]
    fn zero_attempt_has_no_delay() {
        assert_eq!(backoff_delay(0, 25, 250), Duration::ZERO);
    }
}
