//! Redis-backed login attempt store for multi-instance deployments.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use su_core::domain::entities::login_attempt::LoginAttemptRecord;
use su_core::errors::{DomainError, SecurityError};
use su_core::services::guard::LoginAttemptStore;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// How long an unlocked failure count survives without further activity
const ATTEMPT_TTL_SECONDS: usize = 86_400;

fn fails_key(identifier: &str) -> String {
    format!("login:fails:{}", identifier)
}

fn last_key(identifier: &str) -> String {
    format!("login:last:{}", identifier)
}

fn lock_key(identifier: &str) -> String {
    format!("login:lock:{}", identifier)
}

fn storage_error(e: InfrastructureError) -> DomainError {
    SecurityError::StorageFailed {
        message: e.to_string(),
    }
    .into()
}

/// Login attempt state shared across API instances.
///
/// The failure counter uses INCR, so concurrent failures are never
/// lost. The lock key's TTL is the lockout window itself; when it
/// expires Redis drops the lock and, because the counter is given the
/// same expiry at lock time, the failure count resets with it.
#[derive(Clone)]
pub struct RedisAttemptStore {
    client: RedisClient,
}

impl RedisAttemptStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LoginAttemptStore for RedisAttemptStore {
    async fn record_failure(
        &self,
        identifier: &str,
        threshold: u32,
        lockout: Duration,
    ) -> Result<LoginAttemptRecord, DomainError> {
        let now = Utc::now();
        let count = self
            .client
            .increment(&fails_key(identifier), Some(ATTEMPT_TTL_SECONDS))
            .await
            .map_err(storage_error)?;
        self.client
            .set_with_expiry(&last_key(identifier), &now.to_rfc3339(), ATTEMPT_TTL_SECONDS)
            .await
            .map_err(storage_error)?;

        let lockout_seconds = lockout.num_seconds().max(1) as usize;
        let mut locked_until = None;

        if count >= i64::from(threshold) {
            let already_locked = self
                .client
                .exists(&lock_key(identifier))
                .await
                .map_err(storage_error)?;
            if already_locked {
                let ttl = self
                    .client
                    .ttl(&lock_key(identifier))
                    .await
                    .map_err(storage_error)?;
                if ttl > 0 {
                    locked_until = Some(now + Duration::seconds(ttl));
                }
            } else {
                let until = now + lockout;
                self.client
                    .set_with_expiry(&lock_key(identifier), &until.to_rfc3339(), lockout_seconds)
                    .await
                    .map_err(storage_error)?;
                // Counter and lock now expire together, so the lockout
                // running out also resets the count
                self.client
                    .set_with_expiry(&fails_key(identifier), &count.to_string(), lockout_seconds)
                    .await
                    .map_err(storage_error)?;
                locked_until = Some(until);
            }
        }

        Ok(LoginAttemptRecord {
            failed_count: count.max(0) as u32,
            last_attempt_at: now,
            locked_until,
        })
    }

    async fn get(&self, identifier: &str) -> Result<Option<LoginAttemptRecord>, DomainError> {
        let count = match self
            .client
            .get(&fails_key(identifier))
            .await
            .map_err(storage_error)?
        {
            Some(raw) => raw.parse::<u32>().unwrap_or(0),
            None => return Ok(None),
        };

        let now = Utc::now();
        let last_attempt_at = match self
            .client
            .get(&last_key(identifier))
            .await
            .map_err(storage_error)?
        {
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or(now),
            None => now,
        };

        let lock_ttl = self
            .client
            .ttl(&lock_key(identifier))
            .await
            .map_err(storage_error)?;
        let locked_until = if lock_ttl > 0 {
            Some(now + Duration::seconds(lock_ttl))
        } else {
            None
        };

        Ok(Some(LoginAttemptRecord {
            failed_count: count,
            last_attempt_at,
            locked_until,
        }))
    }

    async fn clear(&self, identifier: &str) -> Result<(), DomainError> {
        for key in [
            fails_key(identifier),
            last_key(identifier),
            lock_key(identifier),
        ] {
            self.client.delete(&key).await.map_err(storage_error)?;
        }
        Ok(())
    }
}
