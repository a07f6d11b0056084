//! Bounded retry with exponential backoff around provider calls.

use super::provider::ProviderError;
use std::time::Duration;

/// How many times to try a provider call and how long to wait between tries.
///
/// Only errors for which [`ProviderError::is_transient`] is true are retried;
/// everything else is returned on the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Values below 1 behave as 1.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for each attempt after that.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// A single attempt, no waiting.
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Backoff before attempt number `attempt` (0-based). Attempt 0 never waits.
    pub fn delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    ///
    /// `op` receives the 0-based attempt number. The last error is returned
    /// when every attempt failed.
    pub fn run<T, F>(&self, label: &str, mut op: F) -> Result<T, ProviderError>
    where
        F: FnMut(u32) -> Result<T, ProviderError>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            let delay = self.delay(attempt);
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }

            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt + 1 < attempts => {
                    tracing::warn!(
                        target: "newsquant_market::retry",
                        "{label}: attempt {}/{attempts} failed: {e}; retrying",
                        attempt + 1
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO)
    }

    #[test]
    fn delay_doubles() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));
        assert_eq!(policy.delay(0), Duration::ZERO);
        assert_eq!(policy.delay(1), Duration::from_millis(100));
        assert_eq!(policy.delay(2), Duration::from_millis(200));
        assert_eq!(policy.delay(3), Duration::from_millis(400));
    }

    #[test]
    fn succeeds_after_transient_failure() {
        let mut calls = 0;
        let result = instant(2).run("test", |_| {
            calls += 1;
            if calls == 1 {
                Err(ProviderError::NetworkUnreachable("reset".into()))
            } else {
                Ok(42)
            }
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 2);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let mut calls = 0;
        let result: Result<(), _> = instant(2).run("test", |_| {
            calls += 1;
            Err(ProviderError::Http { status: 502 })
        });
        assert!(matches!(result, Err(ProviderError::Http { status: 502 })));
        assert_eq!(calls, 2);
    }

    #[test]
    fn permanent_error_is_not_retried() {
        let mut calls = 0;
        let result: Result<(), _> = instant(5).run("test", |_| {
            calls += 1;
            Err(ProviderError::SymbolNotFound {
                symbol: "ZZZZ".into(),
            })
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let mut calls = 0;
        let _: Result<(), _> = instant(0).run("test", |_| {
            calls += 1;
            Err(ProviderError::NetworkUnreachable("down".into()))
        });
        assert_eq!(calls, 1);
    }
}
