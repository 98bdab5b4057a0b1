//! Bounded retry with exponential backoff for feed requests
//!
//! The feeds are fetched once per run, so retries stay few and short.
//! Setting `max_retries` to 0 turns retrying off entirely.

use std::future::Future;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::DriveBcError;

/// Configuration for retry behavior with exponential backoff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first request (default: 2)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry in milliseconds (default: 500ms)
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Upper bound for any single delay in milliseconds (default: 10s)
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Whether to add up to 10% random jitter (default: true)
    #[serde(default = "default_true")]
    pub jitter_enabled: bool,
}

const fn default_max_retries() -> u32 {
    2
}

const fn default_initial_delay() -> u64 {
    500
}

const fn default_max_delay() -> u64 {
    10_000
}

const fn default_multiplier() -> f64 {
    2.0
}

const fn default_true() -> bool {
    true
}

const JITTER_FACTOR: f64 = 0.1;

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
            multiplier: default_multiplier(),
            jitter_enabled: default_true(),
        }
    }
}

impl RetryConfig {
    /// A configuration that performs exactly one attempt
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Disable jitter
    #[must_use]
    pub const fn without_jitter(mut self) -> Self {
        self.jitter_enabled = false;
        self
    }

    /// Calculate the delay for a given retry (0-indexed)
    ///
    /// delay = initial_delay * multiplier^attempt, capped at max_delay.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_delay = (self.initial_delay_ms as f64) * self.multiplier.powi(attempt as i32);
        let capped_delay = base_delay.min(self.max_delay_ms as f64);

        let final_delay = if self.jitter_enabled && capped_delay > 0.0 {
            let jitter_range = capped_delay * JITTER_FACTOR;
            let jitter = rand::rng().random_range(-jitter_range..=jitter_range);
            (capped_delay + jitter).max(0.0)
        } else {
            capped_delay
        };

        Duration::from_millis(final_delay as u64)
    }
}

/// Errors that can be checked for retryability
pub trait Retryable {
    /// Returns true if the failed operation may succeed when repeated
    fn is_retryable(&self) -> bool;
}

impl Retryable for DriveBcError {
    fn is_retryable(&self) -> bool {
        Self::is_retryable(self)
    }
}

/// Execute an async operation, retrying retryable failures
///
/// Returns the first success, the first non-retryable error, or the
/// last error once `max_retries` is exhausted.
#[allow(clippy::cast_possible_truncation)]
pub async fn retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    let start = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;

        match operation().await {
            Ok(value) => {
                if attempts > 1 {
                    debug!(
                        attempts,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Request succeeded after retries"
                    );
                }
                return Ok(value);
            },
            Err(err) => {
                let retry_attempt = attempts - 1;

                if !err.is_retryable() {
                    debug!(attempts, error = %err, "Request failed with non-retryable error");
                    return Err(err);
                }

                if retry_attempt >= config.max_retries {
                    if config.max_retries > 0 {
                        warn!(
                            attempts,
                            max_retries = config.max_retries,
                            error = %err,
                            "Request failed after max retries"
                        );
                    }
                    return Err(err);
                }

                let delay = config.delay_for_attempt(retry_attempt);
                warn!(
                    attempt = attempts,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Request failed, retrying"
                );

                tokio::time::sleep(delay).await;
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryConfig {
        RetryConfig {
            max_retries: 2,
            initial_delay_ms: 1,
            max_delay_ms: 5,
            multiplier: 2.0,
            jitter_enabled: false,
        }
    }

    #[test]
    fn config_default_values() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.initial_delay_ms, 500);
        assert_eq!(config.max_delay_ms, 10_000);
        assert!(config.jitter_enabled);
    }

    #[test]
    fn disabled_config_has_no_retries() {
        assert_eq!(RetryConfig::disabled().max_retries, 0);
    }

    #[test]
    fn delay_calculation_without_jitter() {
        let config = RetryConfig::default().without_jitter();
        assert_eq!(config.delay_for_attempt(0).as_millis(), 500);
        assert_eq!(config.delay_for_attempt(1).as_millis(), 1000);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 2000);
    }

    #[test]
    fn delay_capped_at_max() {
        let config = RetryConfig {
            initial_delay_ms: 4000,
            max_delay_ms: 6000,
            ..RetryConfig::default()
        }
        .without_jitter();
        assert_eq!(config.delay_for_attempt(1).as_millis(), 6000);
        assert_eq!(config.delay_for_attempt(8).as_millis(), 6000);
    }

    #[test]
    fn jittered_delay_stays_within_bounds() {
        let config = RetryConfig::default();
        for _ in 0..20 {
            let delay = config.delay_for_attempt(0).as_millis();
            assert!((450..=550).contains(&delay), "delay {delay} out of range");
        }
    }

    #[test]
    fn config_deserialization_uses_defaults() {
        let config: RetryConfig =
            serde_json::from_str(r#"{"max_retries":0}"#).expect("deserialize");
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.initial_delay_ms, 500);
    }

    #[tokio::test]
    async fn retry_succeeds_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let result = retry(&fast(), || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, DriveBcError>(7)
            }
        })
        .await;

        assert_eq!(result.ok(), Some(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_recovers_from_transient_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        let result = retry(&fast(), || {
            let calls = Arc::clone(&calls);
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(DriveBcError::ConnectionFailed("reset".to_string()))
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.ok(), Some(7));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retry_stops_on_parse_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let result: Result<i32, _> = retry(&fast(), || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(DriveBcError::ParseError("eof".to_string()))
            }
        })
        .await;

        assert!(matches!(result, Err(DriveBcError::ParseError(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let result: Result<i32, _> = retry(&fast(), || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(DriveBcError::Timeout { timeout_secs: 1 })
            }
        })
        .await;

        assert!(result.is_err());
        // 1 initial + 2 retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn disabled_retry_makes_single_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let result: Result<i32, _> = retry(&RetryConfig::disabled(), || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(DriveBcError::ConnectionFailed("refused".to_string()))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
