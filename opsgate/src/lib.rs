//! # Opsgate
//!
//! Opsgate grants administrative access to a small operations console. It
//! supports two authentication paths:
//!
//! - **Password**: direct credential verification against the static admin
//!   account, returning a bearer token immediately.
//! - **Rendezvous**: a login attempt is recorded as a pending request, an
//!   operator holding a trusted out-of-band channel approves or rejects it
//!   asynchronously, and the original caller polls until resolution,
//!   exchanging an approval for a token.
//!
//! Both paths sit behind sliding-window brute force protection, and issued
//! tokens guard every administrative operation via [`Opsgate::authorize`].
//!
//! State is intentionally ephemeral and in-memory: a process restart discards
//! all attempts, tokens, and pending requests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use opsgate::{AuthConfig, MemoryRepositoryProvider, Opsgate};
//!
//! #[tokio::main]
//! async fn main() {
//!     let repositories = Arc::new(MemoryRepositoryProvider::new());
//!     let gate = Opsgate::new(repositories, AuthConfig::from_env());
//!
//!     let response = gate.create_login_request(Some("alice")).await.unwrap();
//!     println!("pending request: {}", response.request_id);
//! }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use opsgate_core::{
    repositories::{
        AttemptRepositoryAdapter, LoginRequestRepositoryAdapter, RepositoryProvider,
        TokenRepositoryAdapter,
    },
    services::{
        CredentialService, LoginRequestService, PollOutcome, RateLimitService, TokenService,
    },
};

/// Re-export core types from opsgate_core
///
/// These types are commonly used when working with the Opsgate API.
pub use opsgate_core::{
    AccessToken, AdminConfig, ApprovalNotifier, AuthConfig, Error, LoginRequest, LoginRequestId,
    LoginRequestStatus, Principal, PrincipalId, RateLimitConfig, ResolveAction,
};

/// Re-export the in-memory storage backend
pub use opsgate_storage_memory::MemoryRepositoryProvider;

/// A successful direct authentication: a fresh bearer token and the
/// principal it is bound to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub principal: Principal,
}

/// A newly created rendezvous login request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLoginRequestResponse {
    pub request_id: String,
}

/// The observed state of a login request.
///
/// `token` and `principal` are populated only when `status` is `confirmed`,
/// which also consumes the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollResponse {
    pub status: LoginRequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
}

/// Acknowledgement of an operator decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub ok: bool,
}

/// The main authentication coordinator for the operations console.
///
/// `Opsgate` wires the credential verifier, rate limiter, token store, and
/// login request registry over an injected repository provider, and exposes
/// the operations the surrounding request layer calls.
pub struct Opsgate<R: RepositoryProvider> {
    repositories: Arc<R>,
    credentials: CredentialService,
    rate_limit: RateLimitService<AttemptRepositoryAdapter<R>>,
    tokens: TokenService<TokenRepositoryAdapter<R>>,
    login_requests: LoginRequestService<LoginRequestRepositoryAdapter<R>, TokenRepositoryAdapter<R>>,
}

impl<R: RepositoryProvider> Opsgate<R> {
    /// Create a new Opsgate instance over a repository provider.
    pub fn new(repositories: Arc<R>, config: AuthConfig) -> Self {
        let attempt_repo = Arc::new(AttemptRepositoryAdapter::new(repositories.clone()));
        let token_repo = Arc::new(TokenRepositoryAdapter::new(repositories.clone()));
        let login_request_repo = Arc::new(LoginRequestRepositoryAdapter::new(repositories.clone()));

        let tokens = TokenService::new(token_repo, config.token_ttl);
        let login_requests = LoginRequestService::new(
            login_request_repo,
            tokens.clone(),
            config.login_request_ttl,
        );

        Self {
            repositories,
            credentials: CredentialService::new(config.admin),
            rate_limit: RateLimitService::new(attempt_repo, config.rate_limit),
            tokens,
            login_requests,
        }
    }

    /// Attach an out-of-band channel used to alert operators of new pending
    /// login requests. Delivery is fire-and-forget.
    pub fn with_notifier(mut self, notifier: Arc<dyn ApprovalNotifier>) -> Self {
        self.login_requests = self.login_requests.with_notifier(notifier);
        self
    }

    /// Authenticate against the static admin account and issue a token.
    ///
    /// Rate limiting is checked before the credential check; a failed
    /// credential check is recorded against `client_id` before the error is
    /// returned.
    pub async fn authenticate_by_password(
        &self,
        username: Option<&str>,
        password: Option<&str>,
        client_id: &str,
    ) -> Result<AuthResponse, Error> {
        self.rate_limit.check_allowed(client_id).await?;

        match self.credentials.verify_password(username, password) {
            Ok(principal) => {
                self.rate_limit.record_attempt(client_id, true).await?;
                self.issue_response(principal).await
            }
            Err(err) => {
                self.rate_limit.record_attempt(client_id, false).await?;
                tracing::debug!(client_id = %client_id, error = %err, "Password authentication failed");
                Err(err)
            }
        }
    }

    /// Authenticate an identity against the admin allowlist and issue a
    /// token immediately, with no rendezvous.
    ///
    /// Same rate-limit discipline as the password path.
    pub async fn authenticate_by_identity(
        &self,
        principal_id: Option<i64>,
        username: Option<&str>,
        client_id: &str,
    ) -> Result<AuthResponse, Error> {
        self.rate_limit.check_allowed(client_id).await?;

        match self.credentials.verify_identity(principal_id, username) {
            Ok(principal) => {
                self.rate_limit.record_attempt(client_id, true).await?;
                self.issue_response(principal).await
            }
            Err(err) => {
                self.rate_limit.record_attempt(client_id, false).await?;
                tracing::debug!(client_id = %client_id, error = %err, "Identity authentication failed");
                Err(err)
            }
        }
    }

    /// Record a pending rendezvous login request and alert the out-of-band
    /// channel, if one is attached.
    pub async fn create_login_request(
        &self,
        username_hint: Option<&str>,
    ) -> Result<CreateLoginRequestResponse, Error> {
        let request = self.login_requests.create(username_hint).await?;
        Ok(CreateLoginRequestResponse {
            request_id: request.id.into_inner(),
        })
    }

    /// Observe the state of a login request.
    ///
    /// A confirmed request is exchanged for a fresh token and deleted;
    /// polling the same id again yields `NotFound`.
    pub async fn poll_login_request(&self, request_id: &str) -> Result<PollResponse, Error> {
        let id = LoginRequestId::new(request_id);
        let outcome = self.login_requests.poll(&id).await?;
        let status = outcome.status();
        Ok(match outcome {
            PollOutcome::Confirmed { token, principal } => PollResponse {
                status,
                token: Some(token.token),
                principal: Some(principal),
            },
            _ => PollResponse {
                status,
                token: None,
                principal: None,
            },
        })
    }

    /// Apply an operator decision to a login request.
    ///
    /// This operation carries no caller authentication of its own: it must
    /// only be routed from the trusted out-of-band channel's backend, never
    /// exposed to the original caller.
    pub async fn resolve_login_request(
        &self,
        request_id: &str,
        action: ResolveAction,
        principal: Option<Principal>,
    ) -> Result<ResolveResponse, Error> {
        let id = LoginRequestId::new(request_id);
        self.login_requests.resolve(&id, action, principal).await?;
        Ok(ResolveResponse { ok: true })
    }

    /// Validate a bearer token and return its principal.
    ///
    /// Accepts either the raw token or a full `Authorization: Bearer <token>`
    /// header value. Used as a guard in front of every administrative
    /// operation elsewhere in the system.
    pub async fn authorize(&self, bearer_token: &str) -> Result<Principal, Error> {
        self.tokens.validate(extract_bearer(bearer_token)).await
    }

    /// Health check for the underlying repositories.
    pub async fn health_check(&self) -> Result<(), Error> {
        self.repositories.health_check().await
    }

    /// Sweep expired tokens and aged-out attempt records. Memory bounding
    /// only; lazy expiry already enforces the semantics.
    pub async fn cleanup(&self) -> Result<(), Error> {
        self.tokens.cleanup_expired().await?;
        self.rate_limit.cleanup().await?;
        Ok(())
    }

    async fn issue_response(&self, principal: Principal) -> Result<AuthResponse, Error> {
        let token = self.tokens.issue(principal.clone()).await?;
        Ok(AuthResponse {
            token: token.token,
            expires_at: token.expires_at,
            principal,
        })
    }
}

/// Strip the `Bearer ` scheme from an `Authorization` header value, if
/// present.
fn extract_bearer(value: &str) -> &str {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer("Bearer abc123"), "abc123");
        assert_eq!(extract_bearer("Bearer  abc123"), "abc123");
        assert_eq!(extract_bearer("abc123"), "abc123");
    }
}
