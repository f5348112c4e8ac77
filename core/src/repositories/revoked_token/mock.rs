//! Mock implementation of RevokedTokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::trait_::RevokedTokenRepository;

/// Mock revoked-token repository for testing.
///
/// `fail_writes` simulates a storage outage so the persistence-failure
/// path of the guard can be exercised.
pub struct MockRevokedTokenRepository {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    fail_writes: AtomicBool,
}

impl MockRevokedTokenRepository {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent inserts fail with a database error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn count(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn contains(&self, token_hash: &str) -> bool {
        self.entries.read().await.contains_key(token_hash)
    }
}

impl Default for MockRevokedTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevokedTokenRepository for MockRevokedTokenRepository {
    async fn insert(&self, token_hash: &str, revoked_at: DateTime<Utc>) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Database {
                message: "simulated write failure".to_string(),
            });
        }
        let mut entries = self.entries.write().await;
        entries.entry(token_hash.to_string()).or_insert(revoked_at);
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<String>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.keys().cloned().collect())
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, revoked_at| *revoked_at >= cutoff);
        Ok((before - entries.len()) as u64)
    }
}
