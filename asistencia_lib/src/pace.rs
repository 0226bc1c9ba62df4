//! Delay and retry primitives for paced outbound requests.
//!
//! The scraped site and the destination API are both rate-sensitive, so
//! every sequential loop inserts a fixed pause between requests, and
//! flaky operations can be wrapped with exponential backoff. Neither
//! helper knows anything about HTTP.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Suspends the current step for a fixed duration.
pub async fn with_delay(delay: Duration) {
    sleep(delay).await;
}

/// Invokes `operation` up to `max_attempts` times, sleeping
/// `initial_delay * 2^(attempt-1)` after each failure. The last error is
/// returned once attempts are exhausted.
pub async fn retry_request<F, Fut, T, E>(
    max_attempts: u32,
    initial_delay: Duration,
    operation: F,
) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = max_attempts.max(1);
    let mut last_err = None;

    for attempt in 1..=max_attempts {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(e) => {
                last_err = Some(e);
                if attempt < max_attempts {
                    let backoff = initial_delay * (1u32 << (attempt - 1));
                    sleep(backoff).await;
                }
            }
        }
    }

    Err(last_err.expect("at least one attempt ran"))
}
