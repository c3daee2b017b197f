use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Login request error: {0}")]
    LoginRequest(#[from] LoginRequestError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Notifier error: {0}")]
    Notifier(#[from] NotifierError),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Too many recent failed attempts for this client identifier.
    #[error("Too many failed attempts, retry in {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: i64 },

    /// Username/password pair did not match the configured admin credential.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Identity is not on the configured admin allowlist.
    #[error("Not an administrator")]
    NotAdmin,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Unknown token")]
    Unknown,

    #[error("Token expired")]
    Expired,
}

#[derive(Debug, Error)]
pub enum LoginRequestError {
    #[error("Login request not found")]
    NotFound,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No administrators configured")]
    NoAdminsConfigured,
}

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
}

impl Error {
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::Auth(AuthError::RateLimited { .. }))
    }

    /// Bad credentials or an unknown/invalid token.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            Error::Auth(AuthError::InvalidCredentials) | Error::Token(TokenError::Unknown)
        )
    }

    /// Caller is not on the admin allowlist or the password did not match.
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self,
            Error::Auth(AuthError::InvalidCredentials) | Error::Auth(AuthError::NotAdmin)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::LoginRequest(LoginRequestError::NotFound))
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Error::Token(TokenError::Expired))
    }

    /// Retry-after hint in seconds, present only on rate-limit errors.
    pub fn retry_after_seconds(&self) -> Option<i64> {
        match self {
            Error::Auth(AuthError::RateLimited {
                retry_after_seconds,
            }) => Some(*retry_after_seconds),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let auth_error = Error::Auth(AuthError::InvalidCredentials);
        assert_eq!(
            auth_error.to_string(),
            "Authentication error: Invalid credentials"
        );

        let validation_error =
            Error::Validation(ValidationError::MissingField("username".to_string()));
        assert_eq!(
            validation_error.to_string(),
            "Validation error: Missing required field: username"
        );

        let token_error = Error::Token(TokenError::Expired);
        assert_eq!(token_error.to_string(), "Token error: Token expired");

        let config_error = Error::Config(ConfigError::NoAdminsConfigured);
        assert_eq!(
            config_error.to_string(),
            "Configuration error: No administrators configured"
        );
    }

    #[test]
    fn test_rate_limited_display_and_hint() {
        let error = Error::Auth(AuthError::RateLimited {
            retry_after_seconds: 42,
        });
        assert_eq!(
            error.to_string(),
            "Authentication error: Too many failed attempts, retry in 42s"
        );
        assert!(error.is_rate_limited());
        assert_eq!(error.retry_after_seconds(), Some(42));

        assert_eq!(
            Error::Token(TokenError::Unknown).retry_after_seconds(),
            None
        );
    }

    #[test]
    fn test_is_unauthenticated() {
        assert!(Error::Auth(AuthError::InvalidCredentials).is_unauthenticated());
        assert!(Error::Token(TokenError::Unknown).is_unauthenticated());
        assert!(!Error::Token(TokenError::Expired).is_unauthenticated());
    }

    #[test]
    fn test_is_forbidden() {
        assert!(Error::Auth(AuthError::InvalidCredentials).is_forbidden());
        assert!(Error::Auth(AuthError::NotAdmin).is_forbidden());
        assert!(!Error::Config(ConfigError::NoAdminsConfigured).is_forbidden());
    }

    #[test]
    fn test_error_from_conversions() {
        let error: Error = AuthError::NotAdmin.into();
        assert!(matches!(error, Error::Auth(AuthError::NotAdmin)));

        let error: Error = LoginRequestError::NotFound.into();
        assert!(error.is_not_found());

        let error: Error = TokenError::Expired.into();
        assert!(error.is_expired());
    }
}
