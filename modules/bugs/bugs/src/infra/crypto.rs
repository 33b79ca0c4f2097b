//! Password hashing and bearer-token material.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::{Rng, RngCore};
use sha2::{Digest, Sha256};

use crate::config::HashingConfig;
use crate::domain::error::DomainError;
use crate::domain::ports::CredentialHasher;

/// Argon2id hasher producing PHC strings.
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn from_config(cfg: &HashingConfig) -> anyhow::Result<Self> {
        let params = Params::new(cfg.memory_kib, cfg.iterations, cfg.parallelism, None)
            .map_err(|e| anyhow::anyhow!("invalid argon2 parameters: {e}"))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt_bytes: [u8; 16] = rand::rng().random();
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| DomainError::internal(format!("failed to encode salt: {e}")))?;
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("failed to hash password: {e}")))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        // Parameters are read back from the PHC string.
        self.argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Generate a fresh opaque token: `len` random bytes, hex encoded.
#[must_use]
pub fn new_token(len: usize) -> String {
    let mut buf = vec![0u8; len.max(16)];
    rand::rng().fill_bytes(&mut buf);
    hex::encode(buf)
}

/// Storage key for a token. Raw tokens never reach the database.
#[must_use]
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> Argon2Hasher {
        Argon2Hasher::from_config(&HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn hash_then_verify() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("violet-Harbor-42").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("violet-Harbor-42", &hash));
        assert!(!hasher.verify("violet-harbor-42", &hash));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = cheap_hasher();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!cheap_hasher().verify("anything", "not-a-phc-string"));
    }

    #[test]
    fn tokens_are_unique_hex() {
        let a = new_token(20);
        let b = new_token(20);
        assert_eq!(a.len(), 40);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn digest_is_stable_and_differs_from_token() {
        let token = new_token(20);
        assert_eq!(token_digest(&token), token_digest(&token));
        assert_ne!(token_digest(&token), token);
        assert_eq!(token_digest(&token).len(), 64);
    }
}
