//! Rendezvous login requests
//!
//! This module provides the types for the rendezvous login flow: a caller
//! records a pending login request, an operator holding a trusted out-of-band
//! channel confirms or rejects it, and the caller polls until a terminal
//! status is observed.
//!
//! # Workflow
//!
//! 1. A caller creates a login request (status = `Pending`)
//! 2. The out-of-band channel notifies an operator of the pending request
//! 3. The operator confirms (supplying principal data) or rejects it
//! 4. The caller polls; a confirmed request is exchanged for a bearer token
//!    and deleted, so any further poll yields not-found
//!
//! A pending request left unresolved expires 300 seconds after creation; the
//! expiry is discovered lazily by the next poll.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    error::ValidationError,
    id::{generate_prefixed_id, validate_prefixed_id},
    principal::Principal,
};

/// A unique identifier for a login request.
///
/// Login request IDs are prefixed with `lr_` followed by a base64 URL-safe
/// encoded random string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoginRequestId(String);

impl LoginRequestId {
    /// Create a new LoginRequestId from an existing string.
    pub fn new(id: &str) -> Self {
        LoginRequestId(id.to_string())
    }

    /// Generate a new random login request ID.
    pub fn new_random() -> Self {
        LoginRequestId(generate_prefixed_id("lr"))
    }

    /// Convert to the inner string, consuming self.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this ID has the correct format for a login request ID.
    pub fn is_valid(&self) -> bool {
        validate_prefixed_id(&self.0, "lr")
    }
}

impl Default for LoginRequestId {
    fn default() -> Self {
        Self::new_random()
    }
}

impl From<String> for LoginRequestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LoginRequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for LoginRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The status of a login request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginRequestStatus {
    /// Waiting for an operator decision
    Pending,
    /// Approved by an operator; exchangeable for a bearer token
    Confirmed,
    /// Declined by an operator
    Rejected,
    /// Left pending past its time-to-live
    Expired,
}

impl LoginRequestStatus {
    /// Get the string representation for storage and responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginRequestStatus::Pending => "pending",
            LoginRequestStatus::Confirmed => "confirmed",
            LoginRequestStatus::Rejected => "rejected",
            LoginRequestStatus::Expired => "expired",
        }
    }
}

impl FromStr for LoginRequestStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(LoginRequestStatus::Pending),
            "confirmed" => Ok(LoginRequestStatus::Confirmed),
            "rejected" => Ok(LoginRequestStatus::Rejected),
            "expired" => Ok(LoginRequestStatus::Expired),
            _ => Err(
                ValidationError::InvalidField(format!("Invalid login request status: {s}")).into(),
            ),
        }
    }
}

impl std::fmt::Display for LoginRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An operator decision on a pending login request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveAction {
    Confirm,
    Reject,
}

impl ResolveAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolveAction::Confirm => "confirm",
            ResolveAction::Reject => "reject",
        }
    }
}

impl FromStr for ResolveAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirm" => Ok(ResolveAction::Confirm),
            "reject" => Ok(ResolveAction::Reject),
            _ => Err(ValidationError::InvalidField(format!("Invalid resolve action: {s}")).into()),
        }
    }
}

impl std::fmt::Display for ResolveAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rendezvous login request awaiting, or having received, an operator
/// decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Unique identifier for this request
    pub id: LoginRequestId,

    /// Human-readable hint shown to the operator (username supplied at creation)
    pub username_hint: Option<String>,

    /// Current status of the request
    pub status: LoginRequestStatus,

    /// Principal data supplied by the operator on confirmation
    pub principal: Option<Principal>,

    /// When the request was created
    pub created_at: DateTime<Utc>,
}

impl LoginRequest {
    /// Create a new pending login request with a freshly generated ID.
    pub fn new(username_hint: Option<String>) -> Self {
        Self {
            id: LoginRequestId::new_random(),
            username_hint,
            status: LoginRequestStatus::Pending,
            principal: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_pending() {
        let request = LoginRequest::new(Some("alice".to_string()));
        assert_eq!(request.status, LoginRequestStatus::Pending);
        assert_eq!(request.username_hint.as_deref(), Some("alice"));
        assert!(request.principal.is_none());
        assert!(request.id.is_valid());
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = LoginRequest::new(None);
        let b = LoginRequest::new(None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            LoginRequestStatus::Pending,
            LoginRequestStatus::Confirmed,
            LoginRequestStatus::Rejected,
            LoginRequestStatus::Expired,
        ] {
            assert_eq!(status.as_str().parse::<LoginRequestStatus>().unwrap(), status);
        }

        assert!("approved".parse::<LoginRequestStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&LoginRequestStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
    }

    #[test]
    fn test_resolve_action_parse() {
        assert_eq!(
            "confirm".parse::<ResolveAction>().unwrap(),
            ResolveAction::Confirm
        );
        assert_eq!(
            "reject".parse::<ResolveAction>().unwrap(),
            ResolveAction::Reject
        );
        assert!("approve".parse::<ResolveAction>().is_err());
    }
}
