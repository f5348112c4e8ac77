//! MySQL implementation of the RevokedTokenRepository trait.
//!
//! Durable token blacklist over the `revoked_tokens` table. Rows hold
//! SHA-256 hex digests, never raw token material.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use su_core::errors::DomainError;
use su_core::repositories::RevokedTokenRepository;

/// MySQL implementation of RevokedTokenRepository
pub struct MySqlRevokedTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRevokedTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevokedTokenRepository for MySqlRevokedTokenRepository {
    async fn insert(&self, token_hash: &str, revoked_at: DateTime<Utc>) -> Result<(), DomainError> {
        // INSERT IGNORE makes revoking the same token twice a no-op
        let query = "INSERT IGNORE INTO revoked_tokens (token_hash, revoked_at) VALUES (?, ?)";

        sqlx::query(query)
            .bind(token_hash)
            .bind(revoked_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to insert revoked token: {}", e),
            })?;

        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query("SELECT token_hash FROM revoked_tokens")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to load revoked tokens: {}", e),
            })?;

        rows.iter()
            .map(|row| {
                row.try_get("token_hash").map_err(|e| DomainError::Database {
                    message: format!("Failed to get token_hash: {}", e),
                })
            })
            .collect()
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE revoked_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete expired revocations: {}", e),
            })?;

        Ok(result.rows_affected())
    }
}
