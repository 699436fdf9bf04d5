//! Retry with linear backoff for the fetch layer.
//!
//! Transient failures (network errors and the statuses in
//! [`crate::fetch::RETRY_STATUSES`]) are retried; everything else is returned
//! on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Returns `true` if `err` is worth another attempt after a pause.
///
/// Retriable:
/// - [`FetchError::RetryableStatus`]: 429 or a gateway/server 5xx.
/// - [`FetchError::Http`]: connection reset, timeout, DNS failure.
///
/// Everything else (unexpected status, non-HTML, bot guard, empty document,
/// malformed JSON) would fail the same way again.
pub(crate) fn is_retriable(err: &FetchError) -> bool {
    matches!(
        err,
        FetchError::RetryableStatus { .. } | FetchError::Http(_)
    )
}

/// Runs `operation` up to `max_tries` times in total.
///
/// After the n-th failed attempt the wait is `base_delay * n`:
///
/// | Attempt | Sleep before next attempt |
/// |---------|---------------------------|
/// | 1       | 1 × `base_delay`          |
/// | 2       | 2 × `base_delay`          |
///
/// With `max_tries = 3` there are at most two sleeps. A `max_tries` of `0`
/// behaves like `1`. The last error is returned once attempts run out.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_tries: u32,
    base_delay: Duration,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let max_tries = max_tries.max(1);
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_tries {
                    return Err(err);
                }
                let delay = base_delay.saturating_mul(attempt);
                tracing::info!(
                    attempt,
                    max_tries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "transient fetch error, retrying after backoff"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn unavailable() -> FetchError {
        FetchError::RetryableStatus {
            status: 503,
            url: "https://example.com/t/nature".to_owned(),
        }
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, Duration::ZERO, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, FetchError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_transient_status_then_succeeds() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, Duration::ZERO, || {
            let cc = Arc::clone(&cc);
            async move {
                let n = cc.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(unavailable())
                } else {
                    Ok::<u32, FetchError>(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn max_tries_counts_the_first_attempt() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, Duration::ZERO, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FetchError>(unavailable())
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
        assert!(matches!(
            result,
            Err(FetchError::RetryableStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn zero_max_tries_still_attempts_once() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let _ = retry_with_backoff(0, Duration::ZERO, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FetchError>(unavailable())
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn does_not_retry_bot_guard() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, Duration::ZERO, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FetchError>(FetchError::BotGuard {
                    marker: "cloudflare",
                    url: "https://example.com".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(FetchError::BotGuard { .. })));
    }

    #[test]
    fn unexpected_status_is_not_retriable() {
        assert!(!is_retriable(&FetchError::UnexpectedStatus {
            status: 404,
            url: "https://example.com".to_owned(),
        }));
        assert!(is_retriable(&unavailable()));
    }
}
