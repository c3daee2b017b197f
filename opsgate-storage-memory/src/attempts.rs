//! In-memory attempt log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use opsgate_core::{
    Error,
    attempts::{AttemptRecord, AttemptStats},
    repositories::AttemptRepository,
};

/// Append-only per-client attempt log, pruned lazily on record.
#[derive(Default)]
pub struct MemoryAttemptRepository {
    attempts: DashMap<String, Vec<AttemptRecord>>,
}

impl MemoryAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttemptRepository for MemoryAttemptRepository {
    async fn record_attempt(
        &self,
        client_id: &str,
        success: bool,
        retain_since: DateTime<Utc>,
    ) -> Result<AttemptRecord, Error> {
        let record = AttemptRecord {
            client_id: client_id.to_string(),
            success,
            attempted_at: Utc::now(),
        };

        // Prune and append under the same entry lock
        let mut entry = self.attempts.entry(client_id.to_string()).or_default();
        entry.retain(|a| a.attempted_at >= retain_since);
        entry.push(record.clone());

        Ok(record)
    }

    async fn get_attempt_stats(
        &self,
        client_id: &str,
        since: DateTime<Utc>,
    ) -> Result<AttemptStats, Error> {
        let Some(entry) = self.attempts.get(client_id) else {
            return Ok(AttemptStats::default());
        };

        let failures: Vec<DateTime<Utc>> = entry
            .iter()
            .filter(|a| !a.success && a.attempted_at >= since)
            .map(|a| a.attempted_at)
            .collect();

        Ok(AttemptStats {
            failed_count: failures.len() as u32,
            oldest_failure_at: failures.iter().min().copied(),
            latest_failure_at: failures.iter().max().copied(),
        })
    }

    async fn cleanup_old_attempts(&self, before: DateTime<Utc>) -> Result<u64, Error> {
        let mut removed = 0u64;
        self.attempts.retain(|_, records| {
            let before_len = records.len();
            records.retain(|a| a.attempted_at >= before);
            removed += (before_len - records.len()) as u64;
            !records.is_empty()
        });
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn back_dated(repo: &MemoryAttemptRepository, client_id: &str, count: u32, age_seconds: i64) {
        let attempted_at = Utc::now() - Duration::seconds(age_seconds);
        let mut entry = repo.attempts.entry(client_id.to_string()).or_default();
        for _ in 0..count {
            entry.push(AttemptRecord {
                client_id: client_id.to_string(),
                success: false,
                attempted_at,
            });
        }
    }

    #[tokio::test]
    async fn test_stats_count_failures_within_window() {
        let repo = MemoryAttemptRepository::new();
        let retain_since = Utc::now() - Duration::seconds(300);

        repo.record_attempt("10.0.0.1", false, retain_since)
            .await
            .unwrap();
        repo.record_attempt("10.0.0.1", true, retain_since)
            .await
            .unwrap();
        repo.record_attempt("10.0.0.1", false, retain_since)
            .await
            .unwrap();

        let stats = repo
            .get_attempt_stats("10.0.0.1", Utc::now() - Duration::seconds(300))
            .await
            .unwrap();
        assert_eq!(stats.failed_count, 2);
        assert!(stats.oldest_failure_at.unwrap() <= stats.latest_failure_at.unwrap());
    }

    #[tokio::test]
    async fn test_stats_exclude_attempts_before_cutoff() {
        let repo = MemoryAttemptRepository::new();
        back_dated(&repo, "10.0.0.1", 20, 400);

        let stats = repo
            .get_attempt_stats("10.0.0.1", Utc::now() - Duration::seconds(300))
            .await
            .unwrap();
        assert_eq!(stats.failed_count, 0);
    }

    #[tokio::test]
    async fn test_record_prunes_stale_entries() {
        let repo = MemoryAttemptRepository::new();
        back_dated(&repo, "10.0.0.1", 5, 400);

        repo.record_attempt("10.0.0.1", false, Utc::now() - Duration::seconds(300))
            .await
            .unwrap();

        assert_eq!(repo.attempts.get("10.0.0.1").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_client_has_empty_stats() {
        let repo = MemoryAttemptRepository::new();
        let stats = repo
            .get_attempt_stats("10.0.0.9", Utc::now() - Duration::seconds(300))
            .await
            .unwrap();
        assert_eq!(stats.failed_count, 0);
        assert!(stats.oldest_failure_at.is_none());
    }

    #[tokio::test]
    async fn test_cleanup_drops_empty_identifiers() {
        let repo = MemoryAttemptRepository::new();
        back_dated(&repo, "10.0.0.1", 3, 400);
        back_dated(&repo, "10.0.0.2", 2, 10);

        let removed = repo
            .cleanup_old_attempts(Utc::now() - Duration::seconds(300))
            .await
            .unwrap();
        assert_eq!(removed, 3);
        assert!(!repo.attempts.contains_key("10.0.0.1"));
        assert!(repo.attempts.contains_key("10.0.0.2"));
    }
}
