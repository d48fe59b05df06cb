use std::time::Duration;

/// Delay before retry number `attempt` (0-based), doubling from `initial`
pub fn backoff_delay(initial: Duration, attempt: u32) -> Duration {
    initial.saturating_mul(2u32.saturating_pow(attempt.min(16)))
}
