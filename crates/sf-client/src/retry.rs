//! Retry policy with exponential backoff and jitter.
//!
//! Retries live entirely in the transport. A 429 means the server refused the
//! call without acting on it, so any request may be replayed. A timeout, a
//! dropped connection or a 502/503/504 leaves it unknown whether the server
//! acted, so only idempotent requests are replayed. Every other outcome is
//! handed back as is.

use std::time::Duration;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the first send).
    pub max_attempts: u32,
    /// Initial delay before first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Backoff strategy to use.
    pub backoff: BackoffStrategy,
    /// Upper bound applied to a server-supplied Retry-After.
    pub max_retry_after: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff: BackoffStrategy::ExponentialWithJitter { factor: 2.0 },
            max_retry_after: Duration::from_secs(60),
        }
    }
}

impl RetryConfig {
    /// Set the maximum number of retries.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the delay before the first retry.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the delay ceiling.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff strategy.
    pub fn with_backoff(mut self, backoff: BackoffStrategy) -> Self {
        self.backoff = backoff;
        self
    }

    /// A config that never retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 0,
            ..Default::default()
        }
    }
}

/// Backoff strategy for determining retry delays.
#[derive(Debug, Clone, Copy)]
pub enum BackoffStrategy {
    /// Constant delay between retries.
    Constant,
    /// Exponential increase in delay (delay * factor^attempt).
    Exponential { factor: f64 },
    /// Exponential with random jitter of up to one extra base delay.
    ExponentialWithJitter { factor: f64 },
}

impl BackoffStrategy {
    /// Calculate the delay for a given attempt number (0-indexed).
    ///
    /// The result never exceeds `max_delay`, however large `attempt` grows.
    pub fn delay(&self, attempt: u32, initial_delay: Duration, max_delay: Duration) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = match self {
            BackoffStrategy::Constant => initial_delay.as_secs_f64(),
            BackoffStrategy::Exponential { factor } => {
                initial_delay.as_secs_f64() * factor.powi(exponent)
            }
            BackoffStrategy::ExponentialWithJitter { factor } => {
                let base = initial_delay.as_secs_f64() * factor.powi(exponent);
                base + rand::random::<f64>() * base
            }
        };

        // Clamp before converting: an unbounded product overflows Duration.
        Duration::try_from_secs_f64(secs.min(max_delay.as_secs_f64())).unwrap_or(max_delay)
    }
}

/// Tracks attempts for one request and hands out the delay before each retry.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    attempt: u32,
}

impl RetryPolicy {
    /// Create a new retry policy from config.
    pub fn new(config: RetryConfig) -> Self {
        Self { config, attempt: 0 }
    }

    /// Number of retries handed out so far.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Record a retry and return the delay before sending again, or `None`
    /// once the budget is spent.
    pub fn next_delay(&mut self, retry_after: Option<Duration>) -> Option<Duration> {
        if self.attempt >= self.config.max_attempts {
            return None;
        }

        let delay = match retry_after {
            Some(requested) => std::cmp::min(requested, self.config.max_retry_after),
            None => self.config.backoff.delay(
                self.attempt,
                self.config.initial_delay,
                self.config.max_delay,
            ),
        };

        self.attempt += 1;
        Some(delay)
    }
}

/// Whether a response with `status` may be replayed.
pub(crate) fn is_retryable_status(status: u16, idempotent: bool) -> bool {
    match status {
        429 => true,
        502..=504 => idempotent,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_no_retry() {
        let mut policy = RetryPolicy::new(RetryConfig::no_retry());
        assert!(policy.next_delay(None).is_none());
    }

    #[test]
    fn test_exponential_backoff() {
        let strategy = BackoffStrategy::Exponential { factor: 2.0 };
        let initial = Duration::from_secs(1);
        let max = Duration::from_secs(60);

        assert_eq!(strategy.delay(0, initial, max), Duration::from_secs(1));
        assert_eq!(strategy.delay(2, initial, max), Duration::from_secs(4));
        assert_eq!(strategy.delay(10, initial, max), Duration::from_secs(60));
    }

    #[test]
    fn test_exponential_with_jitter_stays_in_band() {
        let strategy = BackoffStrategy::ExponentialWithJitter { factor: 2.0 };
        let delay = strategy.delay(1, Duration::from_secs(1), Duration::from_secs(60));
        assert!(delay >= Duration::from_secs(2));
        assert!(delay <= Duration::from_secs(4));
    }

    #[test]
    fn test_large_attempt_is_capped() {
        let max = Duration::from_secs(30);
        for strategy in [
            BackoffStrategy::Exponential { factor: 2.0 },
            BackoffStrategy::ExponentialWithJitter { factor: 2.0 },
        ] {
            assert_eq!(strategy.delay(70, Duration::from_millis(500), max), max);
            assert_eq!(strategy.delay(u32::MAX, Duration::from_millis(500), max), max);
        }
    }

    #[test]
    fn test_long_retry_budget_never_exceeds_ceiling() {
        let config = RetryConfig::default().with_max_attempts(100);
        let mut policy = RetryPolicy::new(config);

        while let Some(delay) = policy.next_delay(None) {
            assert!(delay <= Duration::from_secs(30));
        }
        assert_eq!(policy.attempt(), 100);
    }

    #[test]
    fn test_policy_exhausts() {
        let config = RetryConfig::default()
            .with_max_attempts(2)
            .with_backoff(BackoffStrategy::Constant)
            .with_initial_delay(Duration::from_millis(10));
        let mut policy = RetryPolicy::new(config);

        assert_eq!(policy.next_delay(None), Some(Duration::from_millis(10)));
        assert_eq!(policy.next_delay(None), Some(Duration::from_millis(10)));
        assert_eq!(policy.attempt(), 2);
        assert!(policy.next_delay(None).is_none());
    }

    #[test]
    fn test_retry_after_is_capped() {
        let mut policy = RetryPolicy::new(RetryConfig::default());

        let delay = policy.next_delay(Some(Duration::from_secs(30))).unwrap();
        assert_eq!(delay, Duration::from_secs(30));

        let delay = policy.next_delay(Some(Duration::from_secs(120))).unwrap();
        assert_eq!(delay, Duration::from_secs(60));
    }

    #[test]
    fn test_retryable_statuses() {
        for status in [429, 502, 503, 504] {
            assert!(is_retryable_status(status, true), "{status} should be retryable");
        }
        for status in [200, 204, 400, 401, 404, 500] {
            assert!(!is_retryable_status(status, true), "{status} should not be retryable");
        }
    }

    #[test]
    fn test_non_idempotent_retries_only_throttling() {
        assert!(is_retryable_status(429, false));
        for status in [502, 503, 504] {
            assert!(!is_retryable_status(status, false), "{status} may have been applied");
        }
    }
}
