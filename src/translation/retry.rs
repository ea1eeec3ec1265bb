/*!
 * Bounded exponential backoff for transient failures.
 *
 * Remote translation calls can fail on rate limits or network hiccups;
 * those are retried here with a doubling delay. The helper is generic so
 * the policy can be tested without any provider or network in the loop.
 */

use std::future::Future;
use std::time::Duration;

use log::warn;

use crate::errors::{ProviderError, TranslationError};

/// Errors that can indicate whether a retry is worthwhile
pub trait Retryable {
    /// Whether a retry with backoff can reasonably succeed
    fn is_retryable(&self) -> bool;
}

impl Retryable for ProviderError {
    fn is_retryable(&self) -> bool {
        ProviderError::is_retryable(self)
    }
}

impl Retryable for TranslationError {
    fn is_retryable(&self) -> bool {
        match self {
            TranslationError::Provider(e) => e.is_retryable(),
            TranslationError::EmptyResponse => false,
            TranslationError::PageFailed { .. } => false,
        }
    }
}

/// Run `operation` up to `max_attempts` times, sleeping between attempts
/// with exponential backoff starting at `base_delay`.
///
/// Non-retryable errors are returned immediately; a retryable error on
/// the final attempt is returned as-is so the caller can attach context.
///
/// # Arguments
/// * `operation` - Closure producing the future to run per attempt
/// * `max_attempts` - Total attempts, including the first (minimum 1)
/// * `base_delay` - Delay before the second attempt; doubled each retry
pub async fn with_retry<T, E, F, Fut>(
    mut operation: F,
    max_attempts: u32,
    base_delay: Duration,
) -> Result<T, E>
where
    E: Retryable + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if !error.is_retryable() || attempt >= max_attempts {
                    return Err(error);
                }

                // Doubles on each retry: base, 2*base, 4*base, ...
                let backoff = base_delay * (1u32 << (attempt - 1).min(16));
                warn!(
                    "Transient failure (attempt {}/{}), retrying in {:?}: {}",
                    attempt, max_attempts, backoff, error
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}
