//! Authentication attempt tracking types
//!
//! Attempts are recorded per client identifier as an append-only log of
//! `(timestamp, success)` pairs; only entries within the trailing rate-limit
//! window are retained. The limiter blocks once the count of *failed*
//! attempts within the window reaches the configured threshold. A successful
//! attempt never erases prior failures; the count only drops as entries age
//! out of the window.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded authentication attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// The client identifier the attempt was made under
    pub client_id: String,

    /// Whether the authentication check succeeded
    pub success: bool,

    /// When the attempt was recorded
    pub attempted_at: DateTime<Utc>,
}

/// Failure statistics for a client identifier within a time window.
#[derive(Debug, Clone, Default)]
pub struct AttemptStats {
    /// Number of failed attempts within the window
    pub failed_count: u32,

    /// Timestamp of the oldest failed attempt within the window
    pub oldest_failure_at: Option<DateTime<Utc>>,

    /// Timestamp of the most recent failed attempt within the window
    pub latest_failure_at: Option<DateTime<Utc>>,
}

/// The computed rate-limit state for a client identifier.
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    /// The client identifier this status applies to
    pub client_id: String,

    /// Failed attempts within the trailing window
    pub failed_attempts: u32,

    /// Whether further attempts are currently blocked
    pub is_limited: bool,

    /// Earliest instant at which the failure count can drop below the
    /// threshold, present only when limited
    pub retry_after: Option<DateTime<Utc>>,
}

impl RateLimitStatus {
    /// Seconds until a retry may succeed, present only when limited.
    pub fn retry_after_seconds(&self) -> Option<i64> {
        self.retry_after
            .map(|at| (at - Utc::now()).num_seconds().max(1))
    }
}

/// Compute a rate-limit status from attempt statistics.
///
/// The retry-after hint is the instant the oldest in-window failure ages out,
/// which is the earliest moment the failure count can decrease.
pub fn compute_limit_status(
    client_id: &str,
    stats: &AttemptStats,
    max_failed_attempts: u32,
    window: Duration,
) -> RateLimitStatus {
    let is_limited = stats.failed_count >= max_failed_attempts;
    RateLimitStatus {
        client_id: client_id.to_string(),
        failed_attempts: stats.failed_count,
        is_limited,
        retry_after: if is_limited {
            stats.oldest_failure_at.map(|at| at + window)
        } else {
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_not_limited() {
        let stats = AttemptStats {
            failed_count: 19,
            oldest_failure_at: Some(Utc::now() - Duration::seconds(100)),
            latest_failure_at: Some(Utc::now()),
        };
        let status = compute_limit_status("client", &stats, 20, Duration::seconds(300));
        assert!(!status.is_limited);
        assert!(status.retry_after.is_none());
        assert_eq!(status.retry_after_seconds(), None);
    }

    #[test]
    fn test_at_threshold_is_limited_with_hint() {
        let oldest = Utc::now() - Duration::seconds(100);
        let stats = AttemptStats {
            failed_count: 20,
            oldest_failure_at: Some(oldest),
            latest_failure_at: Some(Utc::now()),
        };
        let status = compute_limit_status("client", &stats, 20, Duration::seconds(300));
        assert!(status.is_limited);
        assert_eq!(status.retry_after, Some(oldest + Duration::seconds(300)));

        // ~200 seconds until the oldest failure ages out
        let hint = status.retry_after_seconds().unwrap();
        assert!(hint > 195 && hint <= 200);
    }

    #[test]
    fn test_hint_is_clamped_to_at_least_one_second() {
        let status = RateLimitStatus {
            client_id: "client".to_string(),
            failed_attempts: 20,
            is_limited: true,
            retry_after: Some(Utc::now() - Duration::seconds(5)),
        };
        assert_eq!(status.retry_after_seconds(), Some(1));
    }
}
