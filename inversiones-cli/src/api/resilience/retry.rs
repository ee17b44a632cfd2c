//! Retry policy for MEF report requests
//!
//! Attempts are bounded by `max_attempts`. The delay between attempts grows
//! by `backoff_multiplier` from `base_delay`, capped at `max_delay`. The
//! default config retries immediately, with no delay at all.

use log::debug;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Errors that know whether another attempt could succeed
pub trait RetryableError {
    fn is_retryable(&self) -> bool;
}

/// Retry behaviour for a single logical operation
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Scale each delay by a random factor in [0.5, 1.5)
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }
}

/// Executes async operations under a [`RetryConfig`]
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Attempt count actually used; a config of zero still runs once
    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts.max(1)
    }

    /// Delay to wait after the given (1-based) failed attempt
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if self.config.base_delay.is_zero() {
            return Duration::ZERO;
        }

        let exponent = attempt.saturating_sub(1) as i32;
        let mut secs = self.config.base_delay.as_secs_f64()
            * self.config.backoff_multiplier.powi(exponent);

        if self.config.jitter {
            secs *= rand::rng().random_range(0.5..1.5);
        }

        // Cap before converting: a large multiplier overflows to infinity
        if !self.config.max_delay.is_zero() {
            secs = secs.min(self.config.max_delay.as_secs_f64());
        }

        Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX)
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempt budget is spent. The closure receives the 1-based
    /// attempt number. On exhaustion the last error is returned.
    pub async fn execute<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        E: RetryableError + std::fmt::Display,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.max_attempts();
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => {
                    debug!("Attempt {}/{} failed permanently: {}", attempt, max_attempts, err);
                    return Err(err);
                }
                Err(err) if attempt >= max_attempts => {
                    debug!("Attempt {}/{} failed, no attempts left: {}", attempt, max_attempts, err);
                    return Err(err);
                }
                Err(err) => {
                    let delay = self.delay_for_attempt(attempt);
                    debug!(
                        "Attempt {}/{} failed ({}), retrying in {:?}",
                        attempt, max_attempts, err, delay
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug)]
    enum TestError {
        Transient,
        Fatal,
    }

    impl std::fmt::Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                TestError::Transient => write!(f, "transient"),
                TestError::Fatal => write!(f, "fatal"),
            }
        }
    }

    impl RetryableError for TestError {
        fn is_retryable(&self) -> bool {
            matches!(self, TestError::Transient)
        }
    }

    #[test]
    fn test_default_has_no_delay() {
        let policy = RetryPolicy::new(RetryConfig::default());
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.delay_for_attempt(1), Duration::ZERO);
        assert_eq!(policy.delay_for_attempt(5), Duration::ZERO);
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy::new(RetryConfig {
            max_attempts: 6,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(350),
            backoff_multiplier: 2.0,
            jitter: false,
        });

        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(350));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_millis(350));
    }

    #[test]
    fn test_overflowing_backoff_is_capped() {
        let capped = RetryPolicy::new(RetryConfig {
            max_attempts: 10,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 1e300,
            jitter: true,
        });
        assert!(capped.delay_for_attempt(10) <= Duration::from_secs(5));

        let uncapped = RetryPolicy::new(RetryConfig {
            max_delay: Duration::ZERO,
            jitter: false,
            ..capped.config.clone()
        });
        assert_eq!(uncapped.delay_for_attempt(10), Duration::MAX);
    }

    #[test]
    fn test_zero_attempts_still_runs_once() {
        let policy = RetryPolicy::new(RetryConfig {
            max_attempts: 0,
            ..RetryConfig::default()
        });
        assert_eq!(policy.max_attempts(), 1);
    }

    #[tokio::test]
    async fn test_execute_succeeds_after_transient_failures() {
        let policy = RetryPolicy::new(RetryConfig::default());
        let calls = Cell::new(0);

        let result: Result<u32, TestError> = policy
            .execute(|attempt| {
                calls.set(calls.get() + 1);
                async move {
                    if attempt < 3 {
                        Err(TestError::Transient)
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_execute_stops_on_fatal_error() {
        let policy = RetryPolicy::new(RetryConfig::default());
        let calls = Cell::new(0);

        let result: Result<(), TestError> = policy
            .execute(|_| {
                calls.set(calls.get() + 1);
                async { Err(TestError::Fatal) }
            })
            .await;

        assert!(matches!(result, Err(TestError::Fatal)));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_execute_returns_last_error_when_exhausted() {
        let policy = RetryPolicy::new(RetryConfig {
            max_attempts: 1,
            ..RetryConfig::default()
        });
        let calls = Cell::new(0);

        let result: Result<(), TestError> = policy
            .execute(|_| {
                calls.set(calls.get() + 1);
                async { Err(TestError::Transient) }
            })
            .await;

        assert!(matches!(result, Err(TestError::Transient)));
        assert_eq!(calls.get(), 1);
    }
}
