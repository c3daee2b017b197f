//! In-memory login request registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, mapref::entry::Entry};

use opsgate_core::{
    Error, Principal,
    error::LoginRequestError,
    login_request::{LoginRequest, LoginRequestId, LoginRequestStatus},
    repositories::{LoginRequestRepository, PolledRequest},
};

/// Registry keyed by login request id.
///
/// Both `resolve_request` and `poll_request` run under the entry lock for
/// their key, which is what makes the lazy-expiry transition and the
/// consume-on-confirmation removal safe against a concurrent resolve.
#[derive(Default)]
pub struct MemoryLoginRequestRepository {
    requests: DashMap<String, LoginRequest>,
}

impl MemoryLoginRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoginRequestRepository for MemoryLoginRequestRepository {
    async fn create_request(&self, request: &LoginRequest) -> Result<(), Error> {
        self.requests
            .insert(request.id.as_str().to_string(), request.clone());
        Ok(())
    }

    async fn resolve_request(
        &self,
        id: &LoginRequestId,
        status: LoginRequestStatus,
        principal: Option<Principal>,
    ) -> Result<(), Error> {
        let mut request = self
            .requests
            .get_mut(id.as_str())
            .ok_or(LoginRequestError::NotFound)?;

        // Unconditional overwrite, even of an already-resolved request
        request.status = status;
        request.principal = principal;
        Ok(())
    }

    async fn poll_request(
        &self,
        id: &LoginRequestId,
        expire_before: DateTime<Utc>,
    ) -> Result<PolledRequest, Error> {
        match self.requests.entry(id.as_str().to_string()) {
            Entry::Vacant(_) => Err(LoginRequestError::NotFound.into()),
            Entry::Occupied(mut entry) => {
                let request = entry.get_mut();
                match request.status {
                    LoginRequestStatus::Pending if request.created_at < expire_before => {
                        request.status = LoginRequestStatus::Expired;
                        Ok(PolledRequest::Expired)
                    }
                    LoginRequestStatus::Pending => Ok(PolledRequest::Pending),
                    LoginRequestStatus::Confirmed => {
                        let request = entry.remove();
                        Ok(PolledRequest::Confirmed {
                            principal: request
                                .principal
                                .unwrap_or_else(Principal::default_admin),
                        })
                    }
                    LoginRequestStatus::Rejected => Ok(PolledRequest::Rejected),
                    LoginRequestStatus::Expired => Ok(PolledRequest::Expired),
                }
            }
        }
    }
}
