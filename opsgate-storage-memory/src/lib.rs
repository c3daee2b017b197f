//! In-memory storage backend for opsgate
//!
//! Backs all three stores with `DashMap`s. Per-key atomicity comes from the
//! map's entry locks: every read-modify-write (prune-then-append, resolve,
//! poll-with-lazy-expiry) runs inside a single entry critical section, so a
//! concurrent resolve and poll racing on the same login-request id cannot
//! lose an update.
//!
//! Nothing is persisted; dropping the provider discards all attempts, tokens,
//! and pending requests. That matches the intended lifecycle of admin
//! sessions as ephemeral state.

mod attempts;
mod login_requests;
mod tokens;

pub use attempts::MemoryAttemptRepository;
pub use login_requests::MemoryLoginRequestRepository;
pub use tokens::MemoryTokenRepository;

use async_trait::async_trait;

use opsgate_core::{
    Error,
    repositories::{
        AttemptRepositoryProvider, LoginRequestRepositoryProvider, RepositoryProvider,
        TokenRepositoryProvider,
    },
};

/// In-memory repository provider.
///
/// Construct one per service instance and share it behind an `Arc`; the
/// repositories are independently lockable and safe for concurrent use.
#[derive(Default)]
pub struct MemoryRepositoryProvider {
    attempts: MemoryAttemptRepository,
    tokens: MemoryTokenRepository,
    login_requests: MemoryLoginRequestRepository,
}

impl MemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttemptRepositoryProvider for MemoryRepositoryProvider {
    type AttemptRepo = MemoryAttemptRepository;

    fn attempts(&self) -> &Self::AttemptRepo {
        &self.attempts
    }
}

impl TokenRepositoryProvider for MemoryRepositoryProvider {
    type TokenRepo = MemoryTokenRepository;

    fn tokens(&self) -> &Self::TokenRepo {
        &self.tokens
    }
}

impl LoginRequestRepositoryProvider for MemoryRepositoryProvider {
    type LoginRequestRepo = MemoryLoginRequestRepository;

    fn login_requests(&self) -> &Self::LoginRequestRepo {
        &self.login_requests
    }
}

#[async_trait]
impl RepositoryProvider for MemoryRepositoryProvider {
    async fn health_check(&self) -> Result<(), Error> {
        Ok(())
    }
}
