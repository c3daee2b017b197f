//! Repository trait for bearer token data access.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{Error, token::AccessToken};

/// Repository for issued bearer tokens.
#[async_trait]
pub trait TokenRepository: Send + Sync + 'static {
    /// Store a newly issued token.
    async fn create_token(&self, token: &AccessToken) -> Result<(), Error>;

    /// Look up a token by its opaque string.
    async fn get_token(&self, token: &str) -> Result<Option<AccessToken>, Error>;

    /// Delete a token. Deleting an unknown token is a no-op.
    async fn delete_token(&self, token: &str) -> Result<(), Error>;

    /// Delete every token whose expiry is in the past.
    ///
    /// Expired tokens already fail validation and are purged by the check
    /// that discovers them; this sweep only bounds memory.
    ///
    /// # Returns
    ///
    /// The number of tokens deleted.
    async fn cleanup_expired_tokens(&self, now: DateTime<Utc>) -> Result<u64, Error>;
}
