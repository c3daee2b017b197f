//! Principals — identities permitted to invoke administrative operations
//!
//! A principal is what a successful authentication resolves to: either the
//! static console account (which has no numeric id, only its configured
//! username) or an operator identity from the admin allowlist, which carries
//! a numeric id and/or a username.

use serde::{Deserialize, Serialize};

/// A numeric identifier for an administrative principal.
///
/// This value should be treated as opaque; it is only meaningful to the
/// out-of-band channel that supplied it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalId(i64);

impl PrincipalId {
    pub fn new(id: i64) -> Self {
        PrincipalId(id)
    }

    pub fn into_inner(self) -> i64 {
        self.0
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PrincipalId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An authenticated administrative identity.
///
/// At least one of `id` and `username` is populated on any principal produced
/// by the credential verifier or stored by the login request registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    /// Numeric identifier, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PrincipalId>,

    /// Human-readable username, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Principal {
    pub fn new(id: Option<i64>, username: Option<String>) -> Self {
        Self {
            id: id.map(PrincipalId::new),
            username,
        }
    }

    pub fn from_id(id: i64) -> Self {
        Self {
            id: Some(PrincipalId::new(id)),
            username: None,
        }
    }

    pub fn from_username(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: Some(username.into()),
        }
    }

    /// The fallback identity stored when an operator confirms a login request
    /// without supplying principal data.
    pub fn default_admin() -> Self {
        Self::from_username("admin")
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.id, &self.username) {
            (Some(id), Some(username)) => write!(f, "{username} ({id})"),
            (Some(id), None) => write!(f, "{id}"),
            (None, Some(username)) => write!(f, "{username}"),
            (None, None) => write!(f, "<anonymous>"),
        }
    }
}
