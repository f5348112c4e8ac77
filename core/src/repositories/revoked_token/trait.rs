//! Revoked-token repository trait for the durable blacklist.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

/// Repository trait for the durable token blacklist.
///
/// Entries are SHA-256 hex digests of revoked tokens, never the raw token
/// material. The full set is loaded into memory at startup; writes keep the
/// durable copy in sync.
#[async_trait]
pub trait RevokedTokenRepository: Send + Sync {
    /// Persist a revoked token hash. Idempotent: inserting a hash that is
    /// already present succeeds without error.
    async fn insert(&self, token_hash: &str, revoked_at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Load every stored hash, for seeding the in-memory set at startup
    async fn load_all(&self) -> Result<Vec<String>, DomainError>;

    /// Delete entries revoked before the cutoff; returns how many were removed
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
