//! In-memory bearer token store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use opsgate_core::{Error, repositories::TokenRepository, token::AccessToken};

/// Token store keyed by the opaque token string.
#[derive(Default)]
pub struct MemoryTokenRepository {
    tokens: DashMap<String, AccessToken>,
}

impl MemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn create_token(&self, token: &AccessToken) -> Result<(), Error> {
        self.tokens.insert(token.token.clone(), token.clone());
        Ok(())
    }

    async fn get_token(&self, token: &str) -> Result<Option<AccessToken>, Error> {
        Ok(self.tokens.get(token).map(|entry| entry.clone()))
    }

    async fn delete_token(&self, token: &str) -> Result<(), Error> {
        self.tokens.remove(token);
        Ok(())
    }

    async fn cleanup_expired_tokens(&self, now: DateTime<Utc>) -> Result<u64, Error> {
        let before_len = self.tokens.len();
        self.tokens.retain(|_, token| token.expires_at >= now);
        Ok((before_len - self.tokens.len()) as u64)
    }
}
