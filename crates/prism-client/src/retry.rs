//! Bounded retry with exponential backoff

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::Result;

/// Run `op` until it succeeds, fails with a non-retryable error, or
/// `max_attempts` attempts have been made
///
/// The wait between attempts starts at `initial_backoff` and doubles after
/// each retry.
///
/// # Errors
/// Returns the last error produced by `op`.
pub(crate) async fn with_backoff<T, F, Fut>(
    max_attempts: u32,
    initial_backoff: Duration,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;
    let mut backoff = initial_backoff;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                warn!(error = %e, attempt, ?backoff, "request failed, retrying");
                tokio::time::sleep(backoff).await;
                backoff = backoff.saturating_mul(2);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
