//! MySQL implementation of the UserRepository trait.
//!
//! Account persistence over the `users` table. Soft-deleted rows are
//! filtered in every lookup so a deleted account is indistinguishable
//! from one that never existed.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use su_core::domain::entities::user::{NewUser, User, UserRole, UserStatus};
use su_core::errors::DomainError;
use su_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let role_str: String = row.try_get("role").map_err(|e| DomainError::Database {
            message: format!("Failed to get role: {}", e),
        })?;
        let status_str: String = row.try_get("status").map_err(|e| DomainError::Database {
            message: format!("Failed to get status: {}", e),
        })?;

        Ok(User {
            id: row.try_get("id").map_err(|e| DomainError::Database {
                message: format!("Failed to get id: {}", e),
            })?,
            phone: row.try_get("phone").map_err(|e| DomainError::Database {
                message: format!("Failed to get phone: {}", e),
            })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get password_hash: {}", e),
                })?,
            name: row.try_get("name").map_err(|e| DomainError::Database {
                message: format!("Failed to get name: {}", e),
            })?,
            role: UserRole::from_str(&role_str)
                .map_err(|e| DomainError::Database { message: e })?,
            status: UserStatus::from_str(&status_str)
                .map_err(|e| DomainError::Database { message: e })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, phone, password_hash, name, role, status, created_at, updated_at
            FROM users
            WHERE phone = ? AND status != 'deleted'
        "#;

        let row = sqlx::query(query)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find user by phone: {}", e),
            })?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, phone, password_hash, name, role, status, created_at, updated_at
            FROM users
            WHERE id = ? AND status != 'deleted'
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find user by id: {}", e),
            })?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (phone, password_hash, name, role, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, NOW(6), NOW(6))
        "#;

        let result = sqlx::query(query)
            .bind(&new_user.phone)
            .bind(&new_user.password_hash)
            .bind(&new_user.name)
            .bind(new_user.role.as_str())
            .bind(new_user.status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to insert user: {}", e),
            })?;

        let id = result.last_insert_id() as i64;

        // Re-read the row so database-assigned timestamps come back exact
        self.find_by_id(id).await?.ok_or(DomainError::Database {
            message: format!("Inserted user {} not found on re-read", id),
        })
    }
}
