//! Sliding-window brute force protection.
//!
//! Attempts are tracked per client identifier. Once the count of failed
//! attempts within the trailing window reaches the threshold, further
//! attempts are blocked until enough failures age out of the window. A
//! successful attempt is recorded but never erases prior failures.

use std::sync::Arc;

use chrono::Utc;

use crate::{
    Error,
    attempts::{AttemptRecord, RateLimitStatus, compute_limit_status},
    config::RateLimitConfig,
    error::AuthError,
    repositories::AttemptRepository,
};

/// Service for rate limiting authentication attempts.
///
/// # Thread Safety
///
/// This service is thread-safe and can be shared across multiple tasks.
/// The underlying repository handles concurrent access appropriately.
pub struct RateLimitService<R: AttemptRepository> {
    repository: Arc<R>,
    config: RateLimitConfig,
}

impl<R: AttemptRepository> RateLimitService<R> {
    pub fn new(repository: Arc<R>, config: RateLimitConfig) -> Self {
        Self { repository, config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Record an authentication attempt for a client identifier.
    ///
    /// Always succeeds. Entries older than the window are pruned for that
    /// identifier as a side effect.
    pub async fn record_attempt(
        &self,
        client_id: &str,
        success: bool,
    ) -> Result<AttemptRecord, Error> {
        let retain_since = Utc::now() - self.config.window;
        self.repository
            .record_attempt(client_id, success, retain_since)
            .await
    }

    /// Check whether a client identifier may attempt authentication.
    ///
    /// Fails with `AuthError::RateLimited` (carrying a retry-after hint) when
    /// the failed attempts within the trailing window have reached the
    /// threshold. Must be called before any authentication check.
    pub async fn check_allowed(&self, client_id: &str) -> Result<(), Error> {
        let status = self.limit_status(client_id).await?;
        if status.is_limited {
            tracing::debug!(
                client_id = %client_id,
                failed_attempts = status.failed_attempts,
                "Blocking authentication attempt"
            );
            return Err(AuthError::RateLimited {
                retry_after_seconds: status.retry_after_seconds().unwrap_or(1),
            }
            .into());
        }
        Ok(())
    }

    /// Compute the current rate-limit status for a client identifier.
    pub async fn limit_status(&self, client_id: &str) -> Result<RateLimitStatus, Error> {
        let window_start = Utc::now() - self.config.window;
        let stats = self
            .repository
            .get_attempt_stats(client_id, window_start)
            .await?;

        Ok(compute_limit_status(
            client_id,
            &stats,
            self.config.max_failed_attempts,
            self.config.window,
        ))
    }

    /// Sweep attempts that have aged out of the window across all
    /// identifiers. Memory bounding only; no observable semantic change.
    pub async fn cleanup(&self) -> Result<u64, Error> {
        let before = Utc::now() - self.config.window;
        let removed = self.repository.cleanup_old_attempts(before).await?;
        if removed > 0 {
            tracing::debug!(count = removed, "Cleaned up old attempt records");
        }
        Ok(removed)
    }
}
