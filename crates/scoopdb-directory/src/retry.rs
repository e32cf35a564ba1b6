//! Retry with exponential back-off and jitter for directory provider calls.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors. Permanent errors — not-found, 4xx statuses, geocode
//! misses, malformed responses — are returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::DirectoryError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - [`DirectoryError::RateLimited`] — HTTP 429; the provider asked us to back off.
/// - [`DirectoryError::Http`] — network-level failure (timeout, connection reset).
/// - [`DirectoryError::UnexpectedStatus`] with a 5xx status — transient server error.
///
/// **Not retriable (returned immediately):**
/// - [`DirectoryError::NotFound`] — retrying would return the same 404.
/// - [`DirectoryError::UnexpectedStatus`] with a 4xx status.
/// - [`DirectoryError::Deserialize`] — malformed response; retrying won't fix it.
/// - [`DirectoryError::GeocodeNotFound`] — a valid empty answer, not a failure mode.
/// - [`DirectoryError::InvalidBaseUrl`] — configuration mistake.
pub(crate) fn is_retriable(err: &DirectoryError) -> bool {
    match err {
        DirectoryError::RateLimited { .. } | DirectoryError::Http(_) => true,
        DirectoryError::UnexpectedStatus { status, .. } => *status >= 500,
        DirectoryError::NotFound { .. }
        | DirectoryError::Deserialize { .. }
        | DirectoryError::GeocodeNotFound { .. }
        | DirectoryError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Attempt | Sleep before next attempt    |
/// |---------|------------------------------|
/// | 1       | 1 000 ms × 2⁰ ± 25 % jitter |
/// | 2       | 1 000 ms × 2¹ ± 25 % jitter |
/// | 3       | 1 000 ms × 2² ± 25 % jitter |
///
/// Delay is capped at 60 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, DirectoryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DirectoryError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient directory error — retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
