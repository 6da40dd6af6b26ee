// src/retry.rs
//! Retry with exponential backoff for API operations.
//!
//! The adapter is operation-agnostic: it wraps any single-shot async
//! operation and consults an injected predicate to decide whether a
//! failure is worth retrying. It never special-cases idempotency; the
//! caller decides what to wrap. Read operations driving pagination are
//! wrapped by the client, write operations are not.

use crate::constants::{
    DEFAULT_RETRY_INITIAL_DELAY_MS, DEFAULT_RETRY_MAX_ATTEMPTS, DEFAULT_RETRY_MAX_DELAY_SECS,
};
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Bounded retry configuration: attempt budget plus a capped exponential
/// backoff curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one. A value of 0
    /// is treated as 1: the operation always runs at least once.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Ceiling for the backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            initial_delay: Duration::from_millis(DEFAULT_RETRY_INITIAL_DELAY_MS),
            max_delay: Duration::from_secs(DEFAULT_RETRY_MAX_DELAY_SECS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay,
        }
    }

    /// A policy that runs the operation exactly once.
    pub fn no_retries() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Backoff delay after the given attempt (counting from 1):
    /// `initial_delay * 2^(attempt - 1)`, capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.initial_delay
            .checked_mul(1u32 << exponent)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}

/// Invokes `operation` up to `policy.max_attempts` times, retrying only
/// while `retryable` classifies the most recent failure as transient,
/// sleeping `policy.delay_for(attempt)` between attempts.
///
/// A non-retryable failure propagates immediately. When the attempt
/// budget is exhausted, the *last* failure propagates; earlier failures
/// are logged but not preserved.
pub async fn retry_with_policy<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    mut operation: F,
    retryable: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if !retryable(&error) {
                    log::debug!("attempt {} failed with non-retryable error: {}", attempt, error);
                    return Err(error);
                }

                if attempt >= max_attempts {
                    log::warn!("giving up after {} attempts: {}", attempt, error);
                    return Err(error);
                }

                let delay = policy.delay_for(attempt);
                log::warn!(
                    "attempt {} failed ({}), retrying after {:?}",
                    attempt,
                    error,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
