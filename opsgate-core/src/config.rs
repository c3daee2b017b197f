//! Configuration for the authentication core

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// The static admin account and the operator allowlist.
///
/// The credential pair backs the password path; the allowlists back the
/// identity path. Either may be left empty, disabling that path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Username of the static admin account
    pub username: Option<String>,

    /// Password of the static admin account
    pub password: Option<String>,

    /// Numeric principal identifiers permitted on the identity path
    pub allowed_ids: Vec<i64>,

    /// Usernames permitted on the identity path (matched case-insensitively,
    /// with any leading `@` stripped)
    pub allowed_usernames: Vec<String>,
}

impl AdminConfig {
    /// Whether any identity allowlist entries are configured at all.
    pub fn has_allowlist(&self) -> bool {
        !self.allowed_ids.is_empty() || !self.allowed_usernames.is_empty()
    }
}

/// Sliding-window brute force protection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Length of the trailing window in which failures are counted
    #[serde(with = "duration_seconds")]
    pub window: Duration,

    /// Failed attempts within the window at which further attempts are blocked
    pub max_failed_attempts: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::seconds(300),
            max_failed_attempts: 20,
        }
    }
}

/// Top-level configuration for the authentication core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub admin: AdminConfig,

    pub rate_limit: RateLimitConfig,

    /// How long an issued bearer token remains valid
    #[serde(with = "duration_seconds")]
    pub token_ttl: Duration,

    /// How long a pending login request may wait for an operator decision
    #[serde(with = "duration_seconds")]
    pub login_request_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin: AdminConfig::default(),
            rate_limit: RateLimitConfig::default(),
            token_ttl: Duration::hours(24),
            login_request_ttl: Duration::seconds(300),
        }
    }
}

impl AuthConfig {
    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset:
    ///
    /// - `OPSGATE_ADMIN_USERNAME` / `OPSGATE_ADMIN_PASSWORD` — static account
    /// - `OPSGATE_ADMIN_IDS` — comma-separated numeric allowlist
    /// - `OPSGATE_ADMIN_USERNAMES` — comma-separated username allowlist
    pub fn from_env() -> Self {
        let admin = AdminConfig {
            username: std::env::var("OPSGATE_ADMIN_USERNAME").ok(),
            password: std::env::var("OPSGATE_ADMIN_PASSWORD").ok(),
            allowed_ids: std::env::var("OPSGATE_ADMIN_IDS")
                .map(|raw| {
                    raw.split(',')
                        .filter_map(|part| part.trim().parse().ok())
                        .collect()
                })
                .unwrap_or_default(),
            allowed_usernames: std::env::var("OPSGATE_ADMIN_USERNAMES")
                .map(|raw| {
                    raw.split(',')
                        .map(|part| part.trim().to_string())
                        .filter(|part| !part.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        };

        Self {
            admin,
            ..Self::default()
        }
    }
}

/// Serialize chrono durations as whole seconds for config files.
mod duration_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        value.num_seconds().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let seconds = i64::deserialize(deserializer)?;
        Ok(Duration::seconds(seconds))
    }
}
