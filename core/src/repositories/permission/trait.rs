//! Permission repository trait for role-based access control.

use async_trait::async_trait;

use crate::domain::entities::user::UserRole;
use crate::errors::DomainError;

/// Repository trait for loading role-to-permission assignments.
///
/// Backed by the `role_permissions` join table; each row pairs a role with
/// a permission key such as `enroll:submit` or `user:read_all`.
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Load every (role, permission key) pair
    async fn load_role_permissions(&self) -> Result<Vec<(UserRole, String)>, DomainError>;
}
