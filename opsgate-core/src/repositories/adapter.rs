//! Adapters that wrap a [`RepositoryProvider`] and implement the individual
//! repository traits, so services can be built over a shared provider.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    Error,
    attempts::{AttemptRecord, AttemptStats},
    login_request::{LoginRequest, LoginRequestId, LoginRequestStatus},
    principal::Principal,
    repositories::{
        AttemptRepository, LoginRequestRepository, PolledRequest, RepositoryProvider,
        TokenRepository,
    },
    token::AccessToken,
};

pub struct AttemptRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> AttemptRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> AttemptRepository for AttemptRepositoryAdapter<R> {
    async fn record_attempt(
        &self,
        client_id: &str,
        success: bool,
        retain_since: DateTime<Utc>,
    ) -> Result<AttemptRecord, Error> {
        self.provider
            .attempts()
            .record_attempt(client_id, success, retain_since)
            .await
    }

    async fn get_attempt_stats(
        &self,
        client_id: &str,
        since: DateTime<Utc>,
    ) -> Result<AttemptStats, Error> {
        self.provider
            .attempts()
            .get_attempt_stats(client_id, since)
            .await
    }

    async fn cleanup_old_attempts(&self, before: DateTime<Utc>) -> Result<u64, Error> {
        self.provider.attempts().cleanup_old_attempts(before).await
    }
}

pub struct TokenRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> TokenRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> TokenRepository for TokenRepositoryAdapter<R> {
    async fn create_token(&self, token: &AccessToken) -> Result<(), Error> {
        self.provider.tokens().create_token(token).await
    }

    async fn get_token(&self, token: &str) -> Result<Option<AccessToken>, Error> {
        self.provider.tokens().get_token(token).await
    }

    async fn delete_token(&self, token: &str) -> Result<(), Error> {
        self.provider.tokens().delete_token(token).await
    }

    async fn cleanup_expired_tokens(&self, now: DateTime<Utc>) -> Result<u64, Error> {
        self.provider.tokens().cleanup_expired_tokens(now).await
    }
}

pub struct LoginRequestRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> LoginRequestRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> LoginRequestRepository for LoginRequestRepositoryAdapter<R> {
    async fn create_request(&self, request: &LoginRequest) -> Result<(), Error> {
        self.provider.login_requests().create_request(request).await
    }

    async fn resolve_request(
        &self,
        id: &LoginRequestId,
        status: LoginRequestStatus,
        principal: Option<Principal>,
    ) -> Result<(), Error> {
        self.provider
            .login_requests()
            .resolve_request(id, status, principal)
            .await
    }

    async fn poll_request(
        &self,
        id: &LoginRequestId,
        expire_before: DateTime<Utc>,
    ) -> Result<PolledRequest, Error> {
        self.provider
            .login_requests()
            .poll_request(id, expire_before)
            .await
    }
}
