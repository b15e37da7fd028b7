use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Bounded exponential backoff for the composition step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay after attempt 1; doubles for every attempt after that.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay to wait after failed attempt `attempt` (1-based): base * 2^(attempt-1).
    /// With the default 2s base this is 2s, 4s, 8s, ...
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    pub fn is_last(&self, attempt: u32) -> bool {
        attempt >= self.max_attempts
    }
}

/// Outcome of a cancellable wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    Elapsed,
    Cancelled,
}

/// Sleep for `delay` unless `cancel` fires first. The timer is dropped on
/// cancellation, so nothing runs after the caller abandons the sequence.
pub async fn sleep_or_cancel(delay: Duration, cancel: &CancellationToken) -> Wait {
    if cancel.is_cancelled() {
        return Wait::Cancelled;
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Wait::Cancelled,
        _ = tokio::time::sleep(delay) => Wait::Elapsed,
    }
}
