//! Credential verification against the static admin account and the
//! operator allowlist.

use crate::{
    Error,
    config::AdminConfig,
    error::{AuthError, ConfigError, ValidationError},
    principal::Principal,
};

/// Service for verifying admin credentials and identities.
///
/// Two independent checks, selected by the caller: a password check against
/// the static admin account, and an identity check against the configured
/// allowlists.
pub struct CredentialService {
    config: AdminConfig,
}

impl CredentialService {
    pub fn new(config: AdminConfig) -> Self {
        Self { config }
    }

    /// Verify a username/password pair against the static admin account.
    ///
    /// Returns the sentinel principal for the static account, which has no
    /// numeric id, only its configured username.
    pub fn verify_password(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Principal, Error> {
        let username = non_empty(username)
            .ok_or_else(|| ValidationError::MissingField("username".to_string()))?;
        let password = non_empty(password)
            .ok_or_else(|| ValidationError::MissingField("password".to_string()))?;

        match (&self.config.username, &self.config.password) {
            (Some(expected_username), Some(expected_password))
                if expected_username == username && expected_password == password =>
            {
                Ok(Principal::from_username(expected_username.clone()))
            }
            _ => Err(AuthError::InvalidCredentials.into()),
        }
    }

    /// Verify a principal id and/or username against the admin allowlist.
    ///
    /// Usernames are matched case-insensitively with any leading `@`
    /// stripped, on both sides. A match on either the id or the username
    /// admits the caller; the returned principal is the supplied one.
    pub fn verify_identity(
        &self,
        principal_id: Option<i64>,
        username: Option<&str>,
    ) -> Result<Principal, Error> {
        let username = non_empty(username);
        if principal_id.is_none() && username.is_none() {
            return Err(
                ValidationError::MissingField("principal_id or username".to_string()).into(),
            );
        }

        if !self.config.has_allowlist() {
            return Err(ConfigError::NoAdminsConfigured.into());
        }

        let id_allowed =
            principal_id.is_some_and(|id| self.config.allowed_ids.contains(&id));
        let username_allowed = username.is_some_and(|name| {
            let name = normalize_username(name);
            self.config
                .allowed_usernames
                .iter()
                .any(|allowed| normalize_username(allowed) == name)
        });

        if id_allowed || username_allowed {
            Ok(Principal::new(
                principal_id,
                username.map(|name| name.to_string()),
            ))
        } else {
            Err(AuthError::NotAdmin.into())
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn normalize_username(name: &str) -> String {
    name.strip_prefix('@').unwrap_or(name).to_lowercase()
}
