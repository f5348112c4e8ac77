//! In-memory implementation of RevokedTokenRepository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use su_core::errors::DomainError;
use su_core::repositories::RevokedTokenRepository;

/// In-memory revoked-token store keyed on the token hash
pub struct MockRevokedTokenRepository {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl MockRevokedTokenRepository {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
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
