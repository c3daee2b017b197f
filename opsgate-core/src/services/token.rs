//! Bearer token issuance and validation.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::{
    Error,
    error::TokenError,
    principal::Principal,
    repositories::TokenRepository,
    token::AccessToken,
};

/// Service for issuing and validating opaque bearer tokens.
///
/// There is no revoke operation; revocation happens only through natural
/// expiry. This is a known design limitation.
pub struct TokenService<R: TokenRepository> {
    repository: Arc<R>,
    ttl: Duration,
}

impl<R: TokenRepository> Clone for TokenService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            ttl: self.ttl,
        }
    }
}

impl<R: TokenRepository> TokenService<R> {
    pub fn new(repository: Arc<R>, ttl: Duration) -> Self {
        Self { repository, ttl }
    }

    /// Issue a fresh opaque token bound to a principal. Always succeeds.
    pub async fn issue(&self, principal: Principal) -> Result<AccessToken, Error> {
        let issued_at = Utc::now();
        let token = AccessToken::builder()
            .principal(principal)
            .issued_at(issued_at)
            .expires_at(issued_at + self.ttl)
            .build()?;

        self.repository.create_token(&token).await?;

        Ok(token)
    }

    /// Validate a token and return its bound principal.
    ///
    /// An expired token is deleted by the check that discovers it and never
    /// validates again; a subsequent validation of the same string yields
    /// `TokenError::Unknown`.
    pub async fn validate(&self, token: &str) -> Result<Principal, Error> {
        let record = self
            .repository
            .get_token(token)
            .await?
            .ok_or(TokenError::Unknown)?;

        if record.is_expired() {
            self.repository.delete_token(token).await?;
            return Err(TokenError::Expired.into());
        }

        Ok(record.principal)
    }

    /// Sweep expired tokens. Memory bounding only; expired tokens already
    /// fail validation.
    pub async fn cleanup_expired(&self) -> Result<u64, Error> {
        let removed = self.repository.cleanup_expired_tokens(Utc::now()).await?;
        if removed > 0 {
            tracing::debug!(count = removed, "Cleaned up expired tokens");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::{collections::HashMap, sync::Mutex};

    /// Mock repository for testing
    struct MockTokenRepository {
        tokens: Mutex<HashMap<String, AccessToken>>,
    }

    impl MockTokenRepository {
        fn new() -> Self {
            Self {
                tokens: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl TokenRepository for MockTokenRepository {
        async fn create_token(&self, token: &AccessToken) -> Result<(), Error> {
            self.tokens
                .lock()
                .unwrap()
                .insert(token.token.clone(), token.clone());
            Ok(())
        }

        async fn get_token(&self, token: &str) -> Result<Option<AccessToken>, Error> {
            Ok(self.tokens.lock().unwrap().get(token).cloned())
        }

        async fn delete_token(&self, token: &str) -> Result<(), Error> {
            self.tokens.lock().unwrap().remove(token);
            Ok(())
        }

        async fn cleanup_expired_tokens(&self, now: DateTime<Utc>) -> Result<u64, Error> {
            let mut tokens = self.tokens.lock().unwrap();
            let before_len = tokens.len();
            tokens.retain(|_, t| t.expires_at >= now);
            Ok((before_len - tokens.len()) as u64)
        }
    }

    fn service(repo: Arc<MockTokenRepository>) -> TokenService<MockTokenRepository> {
        TokenService::new(repo, Duration::hours(24))
    }

    #[tokio::test]
    async fn test_issued_token_validates_immediately() {
        let repo = Arc::new(MockTokenRepository::new());
        let service = service(repo);

        let token = service.issue(Principal::from_id(42)).await.unwrap();
        assert!(!token.token.is_empty());

        let principal = service.validate(&token.token).await.unwrap();
        assert_eq!(principal, Principal::from_id(42));
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthenticated() {
        let repo = Arc::new(MockTokenRepository::new());
        let service = service(repo);

        let err = service.validate("no-such-token").await.unwrap_err();
        assert!(err.is_unauthenticated());
    }

    #[tokio::test]
    async fn test_expired_token_is_purged_on_discovery() {
        let repo = Arc::new(MockTokenRepository::new());
        let service = service(repo.clone());

        // Token older than 24 hours, inserted directly through the repository
        let issued_at = Utc::now() - Duration::seconds(86_401);
        let stale = AccessToken::builder()
            .principal(Principal::from_id(1))
            .issued_at(issued_at)
            .expires_at(issued_at + Duration::hours(24))
            .build()
            .unwrap();
        repo.create_token(&stale).await.unwrap();

        let err = service.validate(&stale.token).await.unwrap_err();
        assert!(err.is_expired());

        // Purged by the check that discovered the expiry
        let err = service.validate(&stale.token).await.unwrap_err();
        assert!(err.is_unauthenticated());
    }

    #[tokio::test]
    async fn test_cleanup_removes_only_expired() {
        let repo = Arc::new(MockTokenRepository::new());
        let service = service(repo.clone());

        service.issue(Principal::from_id(1)).await.unwrap();

        let issued_at = Utc::now() - Duration::hours(25);
        let stale = AccessToken::builder()
            .principal(Principal::from_id(2))
            .issued_at(issued_at)
            .expires_at(issued_at + Duration::hours(24))
            .build()
            .unwrap();
        repo.create_token(&stale).await.unwrap();

        assert_eq!(service.cleanup_expired().await.unwrap(), 1);
        assert_eq!(repo.tokens.lock().unwrap().len(), 1);
    }
}
