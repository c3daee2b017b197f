//! Bearer token management
//!
//! This module contains the core access token struct. Tokens are opaque
//! strings used to authorize administrative operations. The core token struct
//! is defined as follows:
//!
//! | Field        | Type        | Description                                  |
//! | ------------ | ----------- | -------------------------------------------- |
//! | `token`      | `String`    | The opaque unguessable token string.         |
//! | `principal`  | `Principal` | The identity the token is bound to.          |
//! | `issued_at`  | `DateTime`  | The timestamp when the token was issued.     |
//! | `expires_at` | `DateTime`  | The timestamp when the token will expire.    |
//!
//! A token's validity is solely a function of its issuance time and the
//! current time; there is no revoke operation, revocation happens only
//! through natural expiry. This is a known design limitation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, error::ValidationError, id::generate_opaque_token, principal::Principal};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The opaque unguessable token string (256 bits of entropy).
    pub token: String,

    /// The principal the token is bound to.
    pub principal: Principal,

    /// The timestamp when the token was issued.
    pub issued_at: DateTime<Utc>,

    /// The timestamp when the token will expire.
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn builder() -> AccessTokenBuilder {
        AccessTokenBuilder::default()
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[derive(Default)]
pub struct AccessTokenBuilder {
    token: Option<String>,
    principal: Option<Principal>,
    issued_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessTokenBuilder {
    pub fn token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    pub fn principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = Some(issued_at);
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn build(self) -> Result<AccessToken, Error> {
        let issued_at = self.issued_at.unwrap_or_else(Utc::now);
        Ok(AccessToken {
            token: self.token.unwrap_or_else(generate_opaque_token),
            principal: self.principal.ok_or(ValidationError::MissingField(
                "Principal is required".to_string(),
            ))?,
            issued_at,
            expires_at: self.expires_at.unwrap_or(issued_at + Duration::hours(24)),
        })
    }
}
