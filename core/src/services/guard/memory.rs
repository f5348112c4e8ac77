//! In-memory attempt store for single-instance deployments and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;

use super::store::LoginAttemptStore;
use crate::domain::entities::login_attempt::LoginAttemptRecord;
use crate::errors::DomainError;

/// Mutex-protected map of login attempt records.
///
/// State is lost on restart, which also resets any active lockouts.
#[derive(Default)]
pub struct InMemoryAttemptStore {
    records: Mutex<HashMap<String, LoginAttemptRecord>>,
}

impl InMemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoginAttemptStore for InMemoryAttemptStore {
    async fn record_failure(
        &self,
        identifier: &str,
        threshold: u32,
        lockout: Duration,
    ) -> Result<LoginAttemptRecord, DomainError> {
        let mut records = self.records.lock().await;
        let now = Utc::now();
        let updated = LoginAttemptRecord::apply_failure(
            records.get(identifier).cloned(),
            now,
            threshold,
            lockout,
        );
        records.insert(identifier.to_string(), updated.clone());
        Ok(updated)
    }

    async fn get(&self, identifier: &str) -> Result<Option<LoginAttemptRecord>, DomainError> {
        Ok(self.records.lock().await.get(identifier).cloned())
    }

    async fn clear(&self, identifier: &str) -> Result<(), DomainError> {
        self.records.lock().await.remove(identifier);
        Ok(())
    }
}
