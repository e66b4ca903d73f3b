//! Bounded exponential-backoff retry for transient failures.

use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Retries a fallible async operation with exponential backoff.
///
/// All attempt state lives in locals of [`RetryPolicy::run`], so one policy
/// value can be shared by any number of concurrent callers; each call gets
/// its own attempt sequence. Waiting is a plain `tokio::time::sleep` on the
/// calling task and never blocks unrelated tasks.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// First wait; doubles on every subsequent attempt.
    pub base_delay: Duration,
    /// Total wait budget across one call's attempts.
    pub max_elapsed: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(10),
            max_elapsed: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Run `op`, retrying transient failures until it succeeds or the next
    /// wait would push total elapsed time past the budget.
    ///
    /// Non-transient errors propagate immediately. On exhaustion the last
    /// underlying error comes back wrapped in [`Error::RetriesExhausted`]
    /// along with the attempt count. Intermediate failures of a call that
    /// eventually succeeds are discarded.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let started = Instant::now();
        let mut delay = self.base_delay;
        let mut attempts: u32 = 1;
        loop {
            let err = match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() => err,
                Err(err) => return Err(err),
            };
            if started.elapsed() + delay > self.max_elapsed {
                return Err(Error::RetriesExhausted {
                    attempts,
                    source: Box::new(err),
                });
            }
            tracing::warn!(attempt = attempts, wait = ?delay, error = %err, "transient failure, backing off");
            tokio::time::sleep(delay).await;
            delay *= 2;
            attempts += 1;
        }
    }
}
