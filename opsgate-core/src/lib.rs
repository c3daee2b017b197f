//! Core functionality for the opsgate admin authentication system
//!
//! This crate contains the domain types and services behind administrative
//! access to the operations console: sliding-window brute force protection,
//! credential verification against the static admin account and operator
//! allowlist, an opaque bearer token store, and the rendezvous login request
//! registry.
//!
//! Storage is injected through the repository traits in [`repositories`];
//! see the `opsgate-storage-memory` crate for the in-memory provider. The
//! `opsgate` crate wires everything into the external interface.
//!
//! All state is intentionally ephemeral: a process restart discards
//! attempts, tokens, and pending requests.

pub mod attempts;
pub mod config;
pub mod error;
pub mod id;
pub mod login_request;
pub mod notifier;
pub mod principal;
pub mod repositories;
pub mod services;
pub mod token;

pub use attempts::{AttemptRecord, AttemptStats, RateLimitStatus};
pub use config::{AdminConfig, AuthConfig, RateLimitConfig};
pub use error::{
    AuthError, ConfigError, Error, LoginRequestError, NotifierError, TokenError, ValidationError,
};
pub use login_request::{LoginRequest, LoginRequestId, LoginRequestStatus, ResolveAction};
pub use notifier::ApprovalNotifier;
pub use principal::{Principal, PrincipalId};
pub use token::AccessToken;
