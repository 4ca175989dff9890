//! Password strength policy.

use crate::{PolicyError, MIN_PASSWORD_LEN};

/// Minimum-length password policy.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    min_len: usize,
}

impl PasswordPolicy {
    /// Creates a policy with an explicit minimum length.
    pub fn new(min_len: usize) -> Self {
        Self { min_len }
    }

    /// Returns the configured minimum length.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Validates a candidate password.
    pub fn validate(&self, password: &str) -> Result<(), PolicyError> {
        if password.chars().count() < self.min_len {
            return Err(PolicyError::TooShort { min: self.min_len });
        }
        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new(MIN_PASSWORD_LEN)
    }
}
