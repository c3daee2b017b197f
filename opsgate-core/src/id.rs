//! ID and token generation utilities
//!
//! This module provides utilities for generating unguessable identifiers with
//! prefixes, similar to Stripe's API, and opaque bearer tokens. Prefixed IDs
//! carry at least 96 bits of entropy; bearer tokens carry 256 bits. Both are
//! URL-safe.

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};

/// Generate a prefixed ID with at least 96 bits of entropy
///
/// The ID format is: `{prefix}_{random_string}`
/// Where the random string is base64 URL-safe encoded without padding.
///
/// # Arguments
/// * `prefix` - The prefix for the ID (e.g., "lr")
pub fn generate_prefixed_id(prefix: &str) -> String {
    // 12 bytes (96 bits) of random data
    let mut bytes = [0u8; 12];
    OsRng.try_fill_bytes(&mut bytes).unwrap();

    let encoded = BASE64_URL_SAFE_NO_PAD.encode(bytes);

    format!("{prefix}_{encoded}")
}

/// Generate an opaque bearer token with 256 bits of entropy
///
/// The token is base64 URL-safe encoded without padding and carries no
/// structure; it is only usable as a lookup key in the token store.
pub fn generate_opaque_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.try_fill_bytes(&mut bytes).unwrap();

    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

/// Validate that a prefixed ID has the expected format
///
/// # Arguments
/// * `id` - The ID to validate
/// * `expected_prefix` - The expected prefix
///
/// # Returns
/// `true` if the ID has the correct format, `false` otherwise
pub fn validate_prefixed_id(id: &str, expected_prefix: &str) -> bool {
    if !id.starts_with(&format!("{expected_prefix}_")) {
        return false;
    }

    let random_part = &id[expected_prefix.len() + 1..];

    match BASE64_URL_SAFE_NO_PAD.decode(random_part) {
        Ok(decoded) => decoded.len() >= 12, // At least 96 bits
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_prefixed_id() {
        let id = generate_prefixed_id("lr");
        assert!(id.starts_with("lr_"));
        assert!(id.len() > 3);

        // Ensure uniqueness
        let id2 = generate_prefixed_id("lr");
        assert_ne!(id, id2);
    }

    #[test]
    fn test_generate_opaque_token_entropy() {
        let token = generate_opaque_token();
        let decoded = BASE64_URL_SAFE_NO_PAD.decode(&token).unwrap();
        assert_eq!(decoded.len(), 32); // 256 bits

        let token2 = generate_opaque_token();
        assert_ne!(token, token2);
    }

    #[test]
    fn test_validate_prefixed_id() {
        let id = generate_prefixed_id("lr");
        assert!(validate_prefixed_id(&id, "lr"));
        assert!(!validate_prefixed_id(&id, "tok"));

        assert!(!validate_prefixed_id("lr", "lr"));
        assert!(!validate_prefixed_id("lr_", "lr"));
        assert!(!validate_prefixed_id("lr_invalid!", "lr"));
    }

    #[test]
    fn test_ids_are_url_safe() {
        let id = generate_prefixed_id("lr");
        assert!(
            id.chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        );

        let token = generate_opaque_token();
        assert!(
            token
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        );
    }
}
