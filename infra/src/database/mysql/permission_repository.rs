//! MySQL implementation of the PermissionRepository trait.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use tracing::warn;

use su_core::domain::entities::user::UserRole;
use su_core::errors::DomainError;
use su_core::repositories::PermissionRepository;

/// MySQL implementation of PermissionRepository
///
/// Reads the `role_permissions` join table. Rows whose role string is
/// not a known [`UserRole`] are logged and skipped rather than failing
/// the whole load.
pub struct MySqlPermissionRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlPermissionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionRepository for MySqlPermissionRepository {
    async fn load_role_permissions(&self) -> Result<Vec<(UserRole, String)>, DomainError> {
        let query = r#"
            SELECT rp.role, p.permission_key
            FROM role_permissions rp
            INNER JOIN permissions p ON rp.permission_id = p.id
        "#;

        let rows = sqlx::query(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to load role permissions: {}", e),
            })?;

        let mut assignments = Vec::with_capacity(rows.len());
        for row in &rows {
            let role_str: String = row.try_get("role").map_err(|e| DomainError::Database {
                message: format!("Failed to get role: {}", e),
            })?;
            let permission_key: String =
                row.try_get("permission_key")
                    .map_err(|e| DomainError::Database {
                        message: format!("Failed to get permission_key: {}", e),
                    })?;

            match UserRole::from_str(&role_str) {
                Ok(role) => assignments.push((role, permission_key)),
                Err(_) => {
                    warn!(role = %role_str, "Skipping permission row with unknown role");
                }
            }
        }

        Ok(assignments)
    }
}
