use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::error::Result;

/// Bounded exponential backoff for rate-limited and failing upstreams.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Extra attempts after the first one.
    pub max_retries: u32,
    pub base_delay: Duration,
    /// Upper bound of the random jitter added to every delay.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_jitter: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// A policy that never sleeps. Useful in tests.
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::ZERO,
            max_jitter: Duration::ZERO,
        }
    }

    /// Delay before retry number `attempt` (0-indexed), capped by the
    /// server-suggested wait when there is one.
    pub fn backoff_delay(&self, attempt: u32, suggested_ms: Option<u64>) -> Duration {
        let exponential = self.base_delay.saturating_mul(1u32 << attempt.min(31));
        let computed = exponential.saturating_add(self.jitter());
        match suggested_ms {
            Some(ms) => computed.min(Duration::from_millis(ms)),
            None => computed,
        }
    }

    fn jitter(&self) -> Duration {
        let max_ms = self.max_jitter.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
    }

    /// Runs `op` until it succeeds, fails with a terminal error, or the
    /// attempts run out. The returned error is always classified.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let total_attempts = self.max_retries + 1;
        let mut attempt = 0;

        loop {
            let err = match op().await {
                Ok(value) => return Ok(value),
                Err(e) => e.into_classified(operation),
            };

            if !err.is_retryable() || attempt >= self.max_retries {
                return Err(err);
            }

            let delay = self.backoff_delay(attempt, err.retry_after_ms());
            tracing::warn!(
                "{} failed (attempt {}/{}): {}. Retrying in {:?}",
                operation,
                attempt + 1,
                total_attempts,
                err,
                delay
            );
            sleep(delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn server_error() -> Error {
        Error::ServerError {
            status: 503,
            message: "unavailable".into(),
        }
    }

    #[tokio::test]
    async fn test_retries_server_errors_until_success() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::immediate(3);

        let result = policy
            .run("fetch profile for alice", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(server_error())
                    } else {
                        Ok("alice")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "alice");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_not_found_fails_after_one_call() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::immediate(3);

        let result: Result<()> = policy
            .run("fetch profile for ghost", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(Error::NotFound("ghost".into())) }
            })
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = RetryPolicy::immediate(3)
            .run("fetch repos for alice", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(Error::Unknown("418".into())) }
            })
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Unknown);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_four_attempts_with_last_error() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = RetryPolicy::immediate(3)
            .run("fetch repos for alice", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    Err(Error::RateLimited {
                        message: format!("attempt {}", n),
                        retry_after_ms: Some(0),
                    })
                }
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimit);
        assert_eq!(err.to_string(), "Rate limit exceeded: attempt 3");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_ambient_errors_come_back_classified() {
        let result: Result<u32> = RetryPolicy::immediate(3)
            .run("fetch languages for alice/repo", || async {
                Err(Error::Config("bad".into()))
            })
            .await;

        match result.unwrap_err() {
            Error::Unknown(msg) => assert!(msg.contains("fetch languages for alice/repo")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_backoff_schedule() {
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_jitter: Duration::from_millis(1000),
        };

        for attempt in 0..4 {
            let floor = Duration::from_millis(1000 * 2u64.pow(attempt));
            let delay = policy.backoff_delay(attempt, None);
            assert!(delay >= floor);
            assert!(delay <= floor + Duration::from_millis(1000));
        }

        assert_eq!(
            policy.backoff_delay(2, Some(250)),
            Duration::from_millis(250)
        );
        assert!(policy.backoff_delay(0, Some(60_000)) <= Duration::from_millis(2000));
    }
}
