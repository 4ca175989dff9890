//! Password hashing and verification.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use crate::{CredentialError, CredentialResult};

/// Derives and verifies one-way credentials from plaintext passwords.
///
/// Implementations own the hashing scheme; callers never see plaintext
/// again after `hash` and can only ask whether a candidate matches.
pub trait CredentialHasher: Send + Sync {
    /// Derives a storable credential from a plaintext password.
    fn hash(&self, password: &str) -> CredentialResult<String>;

    /// Checks a plaintext candidate against a stored credential.
    ///
    /// A malformed stored credential verifies as false rather than
    /// erroring, so a corrupt record cannot be used to log in.
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// Argon2id hasher with a fresh random salt per password.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    /// Creates a hasher with the default Argon2id parameters.
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> CredentialResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::Hash(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
