//! Repository traits for the data access layer
//!
//! This module defines the repository interfaces the services use to reach
//! storage. The traits expose compound atomic operations (record-with-prune,
//! resolve, poll-with-lazy-expiry) rather than get/set pairs: every
//! read-modify-write sequence must be atomic per key so a concurrent resolve
//! and poll racing on the same login-request id cannot lose an update.
//!
//! # Trait Hierarchy
//!
//! - Individual `*Repository` traits define the operations for each store
//! - Individual `*RepositoryProvider` traits provide access to each repository
//! - [`RepositoryProvider`] is a supertrait combining all provider traits plus
//!   a health check

pub mod adapter;
pub mod attempt;
pub mod login_request;
pub mod token;

pub use adapter::{
    AttemptRepositoryAdapter, LoginRequestRepositoryAdapter, TokenRepositoryAdapter,
};
pub use attempt::AttemptRepository;
pub use login_request::{LoginRequestRepository, PolledRequest};
pub use token::TokenRepository;

use async_trait::async_trait;

use crate::Error;

/// Provider trait for attempt repository access.
pub trait AttemptRepositoryProvider: Send + Sync + 'static {
    /// The attempt repository implementation type
    type AttemptRepo: AttemptRepository;

    /// Get the attempt repository
    fn attempts(&self) -> &Self::AttemptRepo;
}

/// Provider trait for token repository access.
pub trait TokenRepositoryProvider: Send + Sync + 'static {
    /// The token repository implementation type
    type TokenRepo: TokenRepository;

    /// Get the token repository
    fn tokens(&self) -> &Self::TokenRepo;
}

/// Provider trait for login request repository access.
pub trait LoginRequestRepositoryProvider: Send + Sync + 'static {
    /// The login request repository implementation type
    type LoginRequestRepo: LoginRequestRepository;

    /// Get the login request repository
    fn login_requests(&self) -> &Self::LoginRequestRepo;
}

/// Provider trait that storage implementations must implement to provide all
/// repositories.
///
/// Storage backends implement each individual `*Repository` trait, each
/// `*RepositoryProvider` trait, and finally this supertrait.
#[async_trait]
pub trait RepositoryProvider:
    AttemptRepositoryProvider + TokenRepositoryProvider + LoginRequestRepositoryProvider
{
    /// Health check for all repositories
    async fn health_check(&self) -> Result<(), Error>;
}
