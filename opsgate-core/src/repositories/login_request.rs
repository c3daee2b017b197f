//! Repository trait for the login request registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    Error,
    login_request::{LoginRequest, LoginRequestId, LoginRequestStatus},
    principal::Principal,
};

/// The observation a poll makes of a login request, after any lazy state
/// transition has been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum PolledRequest {
    /// Still waiting for an operator decision
    Pending,
    /// Confirmed; the request has been removed and its principal returned
    Confirmed { principal: Principal },
    /// Rejected by an operator
    Rejected,
    /// Aged out before any decision
    Expired,
}

/// Repository for rendezvous login requests.
///
/// Both mutation paths (`resolve_request`, `poll_request`) are compound
/// atomic operations: the read of the current state and the write of the new
/// state happen under the same per-key critical section, so a resolve and a
/// poll racing on the same id cannot lose an update.
#[async_trait]
pub trait LoginRequestRepository: Send + Sync + 'static {
    /// Store a newly created pending request.
    async fn create_request(&self, request: &LoginRequest) -> Result<(), Error>;

    /// Apply an operator decision to a request.
    ///
    /// Fails with `LoginRequestError::NotFound` if the id is unknown.
    ///
    /// The write is unconditional: resolving an already-resolved request
    /// overwrites its status and principal, so the later operator decision
    /// wins.
    ///
    /// # Arguments
    ///
    /// * `id` - The request to resolve
    /// * `status` - `Confirmed` or `Rejected`
    /// * `principal` - Principal data stored on confirmation
    async fn resolve_request(
        &self,
        id: &LoginRequestId,
        status: LoginRequestStatus,
        principal: Option<Principal>,
    ) -> Result<(), Error>;

    /// Observe a request, applying lazy expiry and consuming confirmations.
    ///
    /// Fails with `LoginRequestError::NotFound` if the id is unknown. A
    /// pending request created before `expire_before` transitions to expired
    /// in the same step. A confirmed request is removed and its principal
    /// returned; any subsequent poll of the same id yields `NotFound`.
    ///
    /// # Arguments
    ///
    /// * `id` - The request to observe
    /// * `expire_before` - Pending requests created before this instant expire
    async fn poll_request(
        &self,
        id: &LoginRequestId,
        expire_before: DateTime<Utc>,
    ) -> Result<PolledRequest, Error>;
}
