//! Service layer for business logic
//!
//! This module contains concrete service implementations that encapsulate
//! the authentication core: brute force rate limiting, credential
//! verification, the bearer token store, and the rendezvous login registry.

pub mod credentials;
pub mod login_request;
pub mod rate_limit;
pub mod token;

pub use credentials::CredentialService;
pub use login_request::{LoginRequestService, PollOutcome};
pub use rate_limit::RateLimitService;
pub use token::TokenService;
