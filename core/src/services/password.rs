//! Password hashing built on bcrypt.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::{DomainError, DomainResult};

/// Hashes and verifies passwords with bcrypt.
///
/// Verification never returns an error: a malformed or truncated stored
/// hash counts as a mismatch, so callers surface the same
/// authentication failure they would for a wrong password.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password for storage.
    pub fn hash(&self, password: &str) -> DomainResult<String> {
        hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify(&self, password: &str, password_hash: &str) -> bool {
        verify(password, password_hash).unwrap_or(false)
    }
}
