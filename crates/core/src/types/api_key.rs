//! API key generation and hashing.
//!
//! A key is `ic_` followed by 64 lowercase hex characters (32 random bytes).
//! Only the SHA-256 hash and a short display prefix are ever stored; the raw
//! secret is handed to the buyer once and cannot be recovered afterwards.

use rand::TryRngCore;
use rand::rngs::OsRng;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

/// Literal tag every issued key starts with.
pub const API_KEY_TAG: &str = "ic_";

/// Number of random bytes behind each key.
pub const KEY_ENTROPY_BYTES: usize = 32;

/// Length of the non-secret prefix kept for display and identification.
pub const DISPLAY_PREFIX_LENGTH: usize = 10;

/// Errors that can occur while minting an API key.
#[derive(thiserror::Error, Debug)]
pub enum ApiKeyError {
    /// The operating system random source failed.
    #[error("failed to read OS randomness: {0}")]
    Entropy(String),
}

/// A freshly minted API key.
///
/// Holds the raw secret alongside the values that get persisted. `Debug`
/// never prints the secret.
#[derive(Debug)]
pub struct GeneratedApiKey {
    secret: SecretString,
    key_hash: String,
    key_prefix: String,
}

impl GeneratedApiKey {
    /// Mint a new key from the OS random source.
    ///
    /// # Errors
    ///
    /// Returns `ApiKeyError::Entropy` if the OS random source is unavailable.
    pub fn generate() -> Result<Self, ApiKeyError> {
        let mut bytes = [0u8; KEY_ENTROPY_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| ApiKeyError::Entropy(e.to_string()))?;

        Ok(Self::from_entropy(&bytes))
    }

    fn from_entropy(bytes: &[u8]) -> Self {
        let raw = format!("{API_KEY_TAG}{}", hex::encode(bytes));
        let key_hash = hash_secret(&raw);
        let key_prefix = raw.chars().take(DISPLAY_PREFIX_LENGTH).collect();

        Self {
            secret: SecretString::from(raw),
            key_hash,
            key_prefix,
        }
    }

    /// Lowercase hex SHA-256 of the raw secret.
    #[must_use]
    pub fn key_hash(&self) -> &str {
        &self.key_hash
    }

    /// Leading characters of the raw secret, safe to show.
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Consume the key and hand out the raw secret.
    #[must_use]
    pub fn into_secret(self) -> SecretString {
        self.secret
    }

    /// Borrow the raw secret.
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

/// Hash a raw key the way it is stored.
#[must_use]
pub fn hash_secret(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_key_shape() {
        let key = GeneratedApiKey::generate().unwrap();
        let raw = key.expose_secret();

        assert!(raw.starts_with(API_KEY_TAG));
        assert_eq!(raw.len(), API_KEY_TAG.len() + KEY_ENTROPY_BYTES * 2);
        assert!(
            raw.strip_prefix(API_KEY_TAG)
                .unwrap()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_prefix_is_leading_substring() {
        let key = GeneratedApiKey::generate().unwrap();
        assert_eq!(key.key_prefix().len(), DISPLAY_PREFIX_LENGTH);
        assert!(key.expose_secret().starts_with(key.key_prefix()));
    }

    #[test]
    fn test_hash_matches_secret() {
        let key = GeneratedApiKey::generate().unwrap();
        assert_eq!(key.key_hash(), hash_secret(key.expose_secret()));
        assert_eq!(key.key_hash().len(), 64);
        assert_ne!(key.key_hash(), key.expose_secret());
    }

    #[test]
    fn test_known_entropy_produces_known_key() {
        let key = GeneratedApiKey::from_entropy(&[0u8; KEY_ENTROPY_BYTES]);
        let expected_raw = format!("ic_{}", "0".repeat(64));
        assert_eq!(key.expose_secret(), expected_raw);
        assert_eq!(key.key_prefix(), "ic_0000000");

        let expected_hash = hex::encode(Sha256::digest(expected_raw.as_bytes()));
        assert_eq!(key.key_hash(), expected_hash);
    }

    #[test]
    fn test_keys_are_distinct() {
        let first = GeneratedApiKey::generate().unwrap();
        let second = GeneratedApiKey::generate().unwrap();
        assert_ne!(first.key_hash(), second.key_hash());
        assert_ne!(first.expose_secret(), second.expose_secret());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let key = GeneratedApiKey::generate().unwrap();
        let debug_output = format!("{key:?}");
        assert!(!debug_output.contains(key.expose_secret()));
        assert!(debug_output.contains(key.key_hash()));
    }

    #[test]
    fn test_into_secret_returns_raw_key() {
        let key = GeneratedApiKey::generate().unwrap();
        let hash = key.key_hash().to_owned();
        let secret = key.into_secret();
        assert_eq!(hash_secret(secret.expose_secret()), hash);
    }
}
