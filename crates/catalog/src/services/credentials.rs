//! Credential hashing capability.
//!
//! The store consumes hashing as an opaque capability so it never touches
//! plaintext handling details; [`Argon2Verifier`] is the production
//! implementation.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors from credential hashing.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Password hashing error.
    #[error("password hashing error")]
    Hash,
}

/// Opaque password hashing and verification capability.
///
/// `hash` produces an opaque digest string; `verify` checks a plaintext
/// against a stored digest and is fail-closed: any malformed digest verifies
/// as `false`, it never errors.
pub trait CredentialVerifier: Send + Sync {
    /// Hash a plaintext password into a storable digest.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Hash` if hashing fails.
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError>;

    /// Verify a plaintext password against a stored digest.
    fn verify(&self, plaintext: &str, digest: &str) -> bool;
}

/// Argon2id-backed [`CredentialVerifier`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Verifier;

impl CredentialVerifier for Argon2Verifier {
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| CredentialError::Hash)
    }

    fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };

        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}
