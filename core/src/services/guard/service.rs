//! Account security guard.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use su_shared::utils::phone::mask_phone_number;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::config::SecurityGuardConfig;
use super::store::LoginAttemptStore;
use crate::errors::{DomainResult, SecurityError, ValidationError};
use crate::repositories::RevokedTokenRepository;

/// Login throttling and token revocation in one place.
///
/// Failed-attempt state lives in the [`LoginAttemptStore`]. The token
/// blacklist is a set of SHA-256 hex digests held in memory for lookups
/// and mirrored to the [`RevokedTokenRepository`] so revocations survive
/// restarts.
pub struct SecurityGuard<S, B> {
    attempt_store: Arc<S>,
    blacklist_repository: Arc<B>,
    revoked: RwLock<HashSet<String>>,
    config: SecurityGuardConfig,
}

impl<S, B> SecurityGuard<S, B>
where
    S: LoginAttemptStore,
    B: RevokedTokenRepository,
{
    pub fn new(
        attempt_store: Arc<S>,
        blacklist_repository: Arc<B>,
        config: SecurityGuardConfig,
    ) -> Self {
        Self {
            attempt_store,
            blacklist_repository,
            revoked: RwLock::new(HashSet::new()),
            config,
        }
    }

    /// SHA-256 hex digest under which a token is blacklisted.
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Records the outcome of a login attempt for `identifier`.
    ///
    /// A success clears any failure state. Failures accumulate until the
    /// configured threshold opens a lockout window. Store I/O problems
    /// are logged and swallowed: bookkeeping must never take the login
    /// flow down with it. An empty identifier is a caller bug and is
    /// rejected.
    pub async fn record_login_attempt(&self, identifier: &str, success: bool) -> DomainResult<()> {
        if identifier.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "identifier".to_string(),
            }
            .into());
        }

        if success {
            if let Err(e) = self.attempt_store.clear(identifier).await {
                error!(
                    identifier = %mask_phone_number(identifier),
                    error = %e,
                    event = "attempt_store_failure",
                    "Failed to clear login attempt state"
                );
            }
            return Ok(());
        }

        match self
            .attempt_store
            .record_failure(
                identifier,
                self.config.max_login_attempts,
                self.config.lockout_duration(),
            )
            .await
        {
            Ok(record) => {
                if record.is_locked(Utc::now()) && record.failed_count == self.config.max_login_attempts
                {
                    warn!(
                        identifier = %mask_phone_number(identifier),
                        failed_count = record.failed_count,
                        lockout_minutes = self.config.lockout_duration_minutes,
                        event = "account_locked",
                        "Account locked after repeated failed logins"
                    );
                }
            }
            Err(e) => {
                error!(
                    identifier = %mask_phone_number(identifier),
                    error = %e,
                    event = "attempt_store_failure",
                    "Failed to record login attempt"
                );
            }
        }
        Ok(())
    }

    /// Whether the identifier is currently locked out.
    ///
    /// Observing an expired lock clears the stored record, so the next
    /// failure starts counting from one.
    pub async fn is_account_locked(&self, identifier: &str) -> DomainResult<bool> {
        let record = match self.attempt_store.get(identifier).await? {
            Some(record) => record,
            None => return Ok(false),
        };

        let now = Utc::now();
        if record.is_locked(now) {
            return Ok(true);
        }

        if record.lock_expired(now) {
            if let Err(e) = self.attempt_store.clear(identifier).await {
                error!(
                    identifier = %mask_phone_number(identifier),
                    error = %e,
                    event = "attempt_store_failure",
                    "Failed to clear expired lockout"
                );
            }
        }
        Ok(false)
    }

    /// Seconds left in the lockout window, 0 when not locked.
    pub async fn remaining_lockout_seconds(&self, identifier: &str) -> DomainResult<i64> {
        let remaining = self
            .attempt_store
            .get(identifier)
            .await?
            .map(|record| record.remaining_lockout_seconds(Utc::now()))
            .unwrap_or(0);
        Ok(remaining)
    }

    /// Administrative reset of an identifier's failure state.
    pub async fn reset_login_attempts(&self, identifier: &str) -> DomainResult<()> {
        self.attempt_store.clear(identifier).await?;
        info!(
            identifier = %mask_phone_number(identifier),
            event = "attempts_reset",
            "Login attempt state reset"
        );
        Ok(())
    }

    /// Revokes a token.
    ///
    /// The in-memory set is updated before the repository write, so the
    /// token is dead for this process even if persistence fails; such a
    /// failure is still reported to the caller after being logged.
    pub async fn add_token_to_blacklist(&self, token: &str) -> DomainResult<()> {
        let hash = Self::hash_token(token);
        {
            let mut revoked = self.revoked.write().await;
            revoked.insert(hash.clone());
        }

        if let Err(e) = self.blacklist_repository.insert(&hash, Utc::now()).await {
            error!(
                error = %e,
                event = "blacklist_persist_failed",
                "Failed to persist revoked token hash"
            );
            return Err(SecurityError::BlacklistPersistenceFailed {
                message: e.to_string(),
            }
            .into());
        }

        info!(event = "token_revoked", "Token added to blacklist");
        Ok(())
    }

    /// Membership check against the in-memory blacklist.
    pub async fn is_token_blacklisted(&self, token: &str) -> bool {
        let hash = Self::hash_token(token);
        self.revoked.read().await.contains(&hash)
    }

    /// Loads the persisted blacklist into memory. Called at startup.
    pub async fn load_blacklist(&self) -> DomainResult<usize> {
        let hashes = self.blacklist_repository.load_all().await?;
        let count = hashes.len();

        let mut revoked = self.revoked.write().await;
        *revoked = hashes.into_iter().collect();

        info!(count, event = "blacklist_loaded", "Token blacklist loaded");
        Ok(count)
    }

    /// Deletes blacklist entries older than the retention window and
    /// re-syncs the in-memory set. Hashes that old belong to tokens whose
    /// expiry passed long ago, so dropping them cannot resurrect a session.
    pub async fn cleanup_expired_blacklist(&self) -> DomainResult<u64> {
        let cutoff = Utc::now() - self.config.blacklist_retention();
        let removed = self.blacklist_repository.delete_older_than(cutoff).await?;

        if removed > 0 {
            let hashes = self.blacklist_repository.load_all().await?;
            let mut revoked = self.revoked.write().await;
            *revoked = hashes.into_iter().collect();
        }

        info!(
            removed,
            retention_days = self.config.blacklist_retention_days,
            event = "blacklist_cleanup",
            "Expired blacklist entries removed"
        );
        Ok(removed)
    }
}
