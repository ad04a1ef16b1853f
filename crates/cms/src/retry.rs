//! Exponential-backoff retry for transient CMS failures.
//!
//! [`with_retry`] re-runs an operation while it fails with a retryable
//! [`CmsError`], sleeping `base * 2^(attempt-1)` plus random jitter between
//! attempts, capped at [`RetryConfig::max_delay`].

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::CmsError;

/// Tunable parameters for the backoff strategy.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry, before jitter.
    pub base_delay: Duration,
    /// Upper bound on any single delay, jitter included.
    pub max_delay: Duration,
    /// Upper bound of the uniform random jitter added to each delay.
    pub max_jitter: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            max_jitter: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    /// A config that never retries.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }
}

/// Delay before retry `attempt` (1-based) with an explicit jitter.
pub fn backoff_delay(attempt: u32, config: &RetryConfig, jitter: Duration) -> Duration {
    let exponent = attempt.saturating_sub(1).min(31);
    let exponential = config.base_delay.saturating_mul(1u32 << exponent);
    exponential.saturating_add(jitter).min(config.max_delay)
}

/// Delay before retry `attempt` (1-based) with random jitter.
pub fn next_delay(attempt: u32, config: &RetryConfig) -> Duration {
    let jitter_ms = config.max_jitter.as_millis() as u64;
    let jitter = if jitter_ms == 0 {
        Duration::ZERO
    } else {
        Duration::from_millis(rand::rng().random_range(0..jitter_ms))
    };
    backoff_delay(attempt, config, jitter)
}

/// Run `op` until it succeeds, fails permanently, or retries run out.
///
/// The last error is returned unchanged.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, path: &str, mut op: F) -> Result<T, CmsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CmsError>>,
{
    let mut attempt = 0u32;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < config.max_retries => {
                attempt += 1;
                let delay = next_delay(attempt, config);
                tracing::warn!(
                    path,
                    attempt,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Retrying CMS request",
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
