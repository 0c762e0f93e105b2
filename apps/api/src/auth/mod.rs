pub mod handlers;
pub mod middleware;

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of the opaque token key presented in the Authorization header.
const TOKEN_KEY_LEN: usize = 40;
const SALT_LEN: usize = 16;

/// Generates a fresh opaque token key.
pub fn generate_token_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_KEY_LEN)
        .map(char::from)
        .collect()
}

/// Generates a per-user password salt.
pub fn generate_salt() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LEN)
        .map(char::from)
        .collect()
}

/// Salted SHA-256 digest of a password, hex-encoded.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn verify_password(password: &str, salt: &str, digest: &str) -> bool {
    hash_password(password, salt) == digest
}

/// Extracts the token key from an `Authorization: Token <key>` header value.
/// Other schemes are rejected.
pub fn parse_token_header(value: &str) -> Option<&str> {
    let key = value.strip_prefix("Token ")?.trim();
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_header_accepts_token_scheme() {
        assert_eq!(parse_token_header("Token abc123"), Some("abc123"));
    }

    #[test]
    fn test_parse_token_header_trims_whitespace() {
        assert_eq!(parse_token_header("Token   abc123  "), Some("abc123"));
    }

    #[test]
    fn test_parse_token_header_rejects_other_schemes() {
        assert_eq!(parse_token_header("Bearer abc123"), None);
        assert_eq!(parse_token_header("abc123"), None);
    }

    #[test]
    fn test_parse_token_header_rejects_empty_key() {
        assert_eq!(parse_token_header("Token "), None);
        assert_eq!(parse_token_header("Token    "), None);
    }

    #[test]
    fn test_hash_password_is_deterministic() {
        assert_eq!(
            hash_password("hunter22", "salt"),
            hash_password("hunter22", "salt")
        );
    }

    #[test]
    fn test_hash_password_depends_on_salt() {
        assert_ne!(
            hash_password("hunter22", "salt-a"),
            hash_password("hunter22", "salt-b")
        );
    }

    #[test]
    fn test_verify_password() {
        let salt = generate_salt();
        let digest = hash_password("hunter22", &salt);
        assert!(verify_password("hunter22", &salt, &digest));
        assert!(!verify_password("hunter23", &salt, &digest));
    }

    #[test]
    fn test_generated_key_length() {
        assert_eq!(generate_token_key().len(), 40);
        let a = generate_token_key();
        let b = generate_token_key();
        assert_ne!(a, b);
    }
}
