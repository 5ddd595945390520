//! Retry and throttle handling for the Admin API.
//!
//! Shopify meters GraphQL usage with a leaky bucket of query-cost points.
//! Two mechanisms keep an export inside it:
//!
//! - [`retry_with_backoff`] retries transient failures (HTTP 429, GraphQL
//!   `THROTTLED`, 5xx, network errors) with exponential backoff and jitter.
//! - [`throttle_pause`] inspects the bucket state reported in
//!   `extensions.cost.throttleStatus` and pauses before the next request when
//!   it runs low.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::ThrottleStatus;

/// Upper bound for a single backoff sleep.
const MAX_DELAY_SECS: u64 = 60;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable:
/// - [`ClientError::RateLimited`]: HTTP 429 or a `THROTTLED` GraphQL error.
/// - [`ClientError::ServerError`]: HTTP 5xx.
/// - [`ClientError::Http`]: timeouts and connection failures.
///
/// Everything else (bad credentials, GraphQL validation errors, malformed
/// bodies) would fail the same way again and is returned immediately.
pub(crate) fn is_retriable(err: &ClientError) -> bool {
    match err {
        ClientError::RateLimited { .. } | ClientError::ServerError { .. } => true,
        ClientError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        _ => false,
    }
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// The wait before retry `n` (1-based) is `backoff_base_secs * 2^(n-1)`
/// seconds with ±25 % jitter, capped at 60 s. A `Retry-After` hint carried
/// by [`ClientError::RateLimited`] raises the wait to at least that long.
///
/// With `max_retries = 3` the operation is attempted at most 4 times total.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay = backoff_delay(backoff_base_secs, attempt, retry_after_hint(&err));
        attempt += 1;
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "transient Shopify error, retrying after backoff"
        );
        tokio::time::sleep(delay).await;
    }
}

fn retry_after_hint(err: &ClientError) -> Option<u64> {
    match err {
        ClientError::RateLimited {
            retry_after_secs, ..
        } => Some(*retry_after_secs),
        _ => None,
    }
}

/// Backoff for the retry following failed attempt number `attempt` (0-based).
fn backoff_delay(backoff_base_secs: u64, attempt: u32, retry_after_secs: Option<u64>) -> Duration {
    let computed = backoff_base_secs
        .saturating_mul(1u64 << attempt.min(16))
        .min(MAX_DELAY_SECS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered_ms = (computed as f64 * 1000.0 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
    let floor_ms = retry_after_secs.unwrap_or(0).min(MAX_DELAY_SECS) * 1000;
    Duration::from_millis(jittered_ms.max(floor_ms))
}

/// Returns how long to pause before the next request, if the query-cost
/// bucket has drained below `floor` points.
#[must_use]
pub(crate) fn throttle_pause(
    status: Option<&ThrottleStatus>,
    floor: u32,
    pause_ms: u64,
) -> Option<Duration> {
    let status = status?;
    if pause_ms == 0 || status.currently_available >= f64::from(floor) {
        return None;
    }
    Some(Duration::from_millis(pause_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn rate_limited(retry_after_secs: u64) -> ClientError {
        ClientError::RateLimited {
            shop: "demo.myshopify.com".to_owned(),
            retry_after_secs,
        }
    }

    fn status(currently_available: f64) -> ThrottleStatus {
        ThrottleStatus {
            maximum_available: 1000.0,
            currently_available,
            restore_rate: 50.0,
        }
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ClientError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_on_rate_limited_then_succeeds() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                let n = cc.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(rate_limited(0))
                } else {
                    Ok::<u32, ClientError>(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retries_server_errors() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(1, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                if cc.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(ClientError::ServerError {
                        status: 503,
                        shop: "demo.myshopify.com".to_owned(),
                    })
                } else {
                    Ok::<u32, ClientError>(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn propagates_last_error_after_exhausting_retries() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(2, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ClientError>(rate_limited(0))
            }
        })
        .await;
        // max_retries=2 → 3 total attempts
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(ClientError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn does_not_retry_unauthorized() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ClientError>(ClientError::Unauthorized {
                    shop: "demo.myshopify.com".to_owned(),
                    status: 401,
                })
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ClientError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn does_not_retry_graphql_error() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ClientError>(ClientError::GraphQl {
                    operation: "ProductsPage".to_owned(),
                    message: "Field 'bogus' doesn't exist".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ClientError::GraphQl { .. })));
    }

    #[test]
    fn backoff_is_zero_with_zero_base_and_no_hint() {
        assert_eq!(backoff_delay(0, 3, None), Duration::ZERO);
    }

    #[test]
    fn backoff_honours_retry_after_hint() {
        assert!(backoff_delay(0, 0, Some(2)) >= Duration::from_secs(2));
    }

    #[test]
    fn backoff_stays_within_jitter_band_and_cap() {
        let d = backoff_delay(2, 1, None);
        assert!(d >= Duration::from_millis(3000) && d <= Duration::from_millis(5000), "{d:?}");
        let capped = backoff_delay(2, 30, None);
        assert!(capped <= Duration::from_millis(75_000), "{capped:?}");
    }

    #[test]
    fn throttle_pause_only_below_floor() {
        assert_eq!(
            throttle_pause(Some(&status(50.0)), 100, 2000),
            Some(Duration::from_millis(2000))
        );
        assert_eq!(throttle_pause(Some(&status(100.0)), 100, 2000), None);
        assert_eq!(throttle_pause(None, 100, 2000), None);
    }

    #[test]
    fn throttle_pause_disabled_with_zero_pause() {
        assert_eq!(throttle_pause(Some(&status(0.0)), 100, 0), None);
    }
}
