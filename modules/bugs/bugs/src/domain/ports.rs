//! Outbound ports the domain depends on but does not implement.

use crate::domain::error::DomainError;

/// One-way password hashing.
///
/// Implemented in `infra::crypto` with Argon2id; tests may plug in cheaper schemes.
pub trait CredentialHasher: Send + Sync {
    /// Produce a self-describing hash string (salt and parameters embedded).
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check `password` against a stored hash. A malformed hash never verifies.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
