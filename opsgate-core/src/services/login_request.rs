//! The rendezvous login registry.
//!
//! Drives the login request state machine: callers create pending requests,
//! the out-of-band channel resolves them, and pollers observe the outcome,
//! exchanging a confirmation for a freshly issued bearer token.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::{
    Error,
    login_request::{LoginRequest, LoginRequestId, LoginRequestStatus, ResolveAction},
    notifier::ApprovalNotifier,
    principal::Principal,
    repositories::{LoginRequestRepository, PolledRequest, TokenRepository},
    services::TokenService,
    token::AccessToken,
};

/// The outcome of polling a login request.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// Still waiting for an operator decision
    Pending,
    /// Confirmed and exchanged: the request is gone, the token is live
    Confirmed {
        token: AccessToken,
        principal: Principal,
    },
    /// Rejected by an operator
    Rejected,
    /// Aged out before any decision
    Expired,
}

impl PollOutcome {
    pub fn status(&self) -> LoginRequestStatus {
        match self {
            PollOutcome::Pending => LoginRequestStatus::Pending,
            PollOutcome::Confirmed { .. } => LoginRequestStatus::Confirmed,
            PollOutcome::Rejected => LoginRequestStatus::Rejected,
            PollOutcome::Expired => LoginRequestStatus::Expired,
        }
    }
}

/// Service for the rendezvous login flow.
pub struct LoginRequestService<R: LoginRequestRepository, T: TokenRepository> {
    repository: Arc<R>,
    tokens: TokenService<T>,
    ttl: Duration,
    notifier: Option<Arc<dyn ApprovalNotifier>>,
}

impl<R: LoginRequestRepository, T: TokenRepository> LoginRequestService<R, T> {
    pub fn new(repository: Arc<R>, tokens: TokenService<T>, ttl: Duration) -> Self {
        Self {
            repository,
            tokens,
            ttl,
            notifier: None,
        }
    }

    /// Attach an out-of-band channel to alert operators of new requests.
    pub fn with_notifier(mut self, notifier: Arc<dyn ApprovalNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Create a pending login request and alert the out-of-band channel.
    ///
    /// The notification is fire-and-forget: its failure is logged and never
    /// fails the create.
    pub async fn create(&self, username_hint: Option<&str>) -> Result<LoginRequest, Error> {
        let request = LoginRequest::new(username_hint.map(str::to_string));
        self.repository.create_request(&request).await?;

        tracing::info!(request_id = %request.id, "Created pending login request");

        if let Some(notifier) = &self.notifier {
            let notifier = Arc::clone(notifier);
            let pending = request.clone();
            tokio::spawn(async move {
                if let Err(err) = notifier.notify_pending(&pending).await {
                    tracing::warn!(
                        request_id = %pending.id,
                        error = %err,
                        "Failed to deliver login approval notification"
                    );
                }
            });
        }

        Ok(request)
    }

    /// Apply an operator decision.
    ///
    /// Intended to be invoked only by the trusted out-of-band channel. A
    /// confirmation without principal data stores the default administrator
    /// identity.
    pub async fn resolve(
        &self,
        id: &LoginRequestId,
        action: ResolveAction,
        principal: Option<Principal>,
    ) -> Result<(), Error> {
        match action {
            ResolveAction::Confirm => {
                let principal = principal.unwrap_or_else(Principal::default_admin);
                self.repository
                    .resolve_request(id, LoginRequestStatus::Confirmed, Some(principal))
                    .await?;
            }
            ResolveAction::Reject => {
                self.repository
                    .resolve_request(id, LoginRequestStatus::Rejected, None)
                    .await?;
            }
        }

        tracing::info!(request_id = %id, action = %action, "Resolved login request");
        Ok(())
    }

    /// Observe a request's state.
    ///
    /// A pending request past its time-to-live expires here. A confirmed
    /// request is exchanged for a freshly issued token and deleted; polling
    /// the same id again yields not-found.
    pub async fn poll(&self, id: &LoginRequestId) -> Result<PollOutcome, Error> {
        let expire_before = Utc::now() - self.ttl;
        match self.repository.poll_request(id, expire_before).await? {
            PolledRequest::Pending => Ok(PollOutcome::Pending),
            PolledRequest::Confirmed { principal } => {
                let token = self.tokens.issue(principal.clone()).await?;
                tracing::info!(request_id = %id, principal = %principal, "Exchanged confirmed login request for token");
                Ok(PollOutcome::Confirmed { token, principal })
            }
            PolledRequest::Rejected => Ok(PollOutcome::Rejected),
            PolledRequest::Expired => Ok(PollOutcome::Expired),
        }
    }
}
