//! Repository trait for authentication attempt tracking.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    Error,
    attempts::{AttemptRecord, AttemptStats},
};

/// Repository for per-client authentication attempt data.
///
/// Implementations keep an append-only log of attempts per client identifier.
/// Attempts are recorded for every identifier, whether or not it corresponds
/// to a real account, to prevent enumeration. Memory is unbounded per
/// distinct identifier and must be pruned lazily on access.
#[async_trait]
pub trait AttemptRepository: Send + Sync + 'static {
    /// Record an authentication attempt. Always succeeds.
    ///
    /// As a side effect, entries older than `retain_since` for the same
    /// identifier are pruned in the same atomic step.
    ///
    /// # Arguments
    ///
    /// * `client_id` - The client identifier the attempt was made under
    /// * `success` - Whether the authentication check succeeded
    /// * `retain_since` - Drop retained entries older than this timestamp
    async fn record_attempt(
        &self,
        client_id: &str,
        success: bool,
        retain_since: DateTime<Utc>,
    ) -> Result<AttemptRecord, Error>;

    /// Get failure statistics for a client identifier within a time window.
    ///
    /// # Arguments
    ///
    /// * `client_id` - The client identifier to check
    /// * `since` - Only count attempts after this timestamp
    async fn get_attempt_stats(
        &self,
        client_id: &str,
        since: DateTime<Utc>,
    ) -> Result<AttemptStats, Error>;

    /// Delete attempts older than the given timestamp across all identifiers.
    ///
    /// Purely bounds memory; pruning on record already keeps active
    /// identifiers within the window.
    ///
    /// # Returns
    ///
    /// The number of records deleted.
    async fn cleanup_old_attempts(&self, before: DateTime<Utc>) -> Result<u64, Error>;
}
