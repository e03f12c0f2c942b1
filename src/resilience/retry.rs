//! Bounded retry with exponential backoff.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio_retry::strategy::jitter;
use tracing::debug;

use crate::errors::BotError;

/// How often and how patiently one call site retries.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub multiplier: f64,
    /// Upper bound for any single backoff sleep.
    pub max_delay: Duration,
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            multiplier: 2.0,
            max_delay: Duration::from_secs(4),
            jitter: false,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration, multiplier: f64, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            multiplier,
            max_delay,
            jitter: false,
        }
    }

    #[must_use]
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Backoff before the retry that follows failed attempt `attempt` (0-based):
    /// `min(base * multiplier^attempt, max_delay)`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.base_delay.as_secs_f64() * self.multiplier.powi(exponent);
        let capped = Duration::try_from_secs_f64(secs)
            .map_or(self.max_delay, |d| d.min(self.max_delay));

        if self.jitter { jitter(capped) } else { capped }
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Source of backoff sleeps. Swapped out in tests so no real time passes.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Run `operation` under `policy`.
///
/// Transient failures are retried after a backoff sleep until the attempt
/// budget runs out, at which point the last failure is returned wrapped in
/// [`BotError::RetriesExhausted`]. Permanent failures are returned as-is on
/// the attempt that produced them.
///
/// # Errors
///
/// Returns the first permanent error, or `RetriesExhausted` carrying the
/// last transient one.
pub async fn retry<F, Fut, T>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut operation: F,
) -> Result<T, BotError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BotError>>,
{
    let attempts = policy.attempts();
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if !error.is_transient() => return Err(error),
            Err(error) => {
                attempt += 1;
                if attempt >= attempts {
                    return Err(BotError::RetriesExhausted {
                        attempts,
                        source: Box::new(error),
                    });
                }

                let delay = policy.delay_for(attempt - 1);
                debug!(
                    attempt,
                    max_attempts = attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %error,
                    "transient failure, backing off"
                );
                sleeper.sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_doubles_until_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(3), Duration::from_secs(4));
    }

    #[test]
    fn test_delay_survives_huge_exponent() {
        let policy = RetryPolicy::new(100, Duration::from_secs(1), 10.0, Duration::from_secs(60));
        assert_eq!(policy.delay_for(500), Duration::from_secs(60));
    }

    #[test]
    fn test_jitter_stays_below_cap() {
        let policy = RetryPolicy::default().with_jitter(true);
        for attempt in 0..5 {
            assert!(policy.delay_for(attempt) <= Duration::from_secs(4));
        }
    }

    #[test]
    fn test_zero_attempts_still_runs_once() {
        let policy = RetryPolicy::new(0, Duration::ZERO, 1.0, Duration::ZERO);
        assert_eq!(policy.attempts(), 1);
    }
}
