//! In-memory implementation of PermissionRepository.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use su_core::domain::entities::user::UserRole;
use su_core::errors::DomainError;
use su_core::repositories::PermissionRepository;

/// In-memory permission repository serving a fixed assignment list
pub struct MockPermissionRepository {
    assignments: Arc<RwLock<Vec<(UserRole, String)>>>,
}

impl MockPermissionRepository {
    pub fn new(assignments: Vec<(UserRole, String)>) -> Self {
        Self {
            assignments: Arc::new(RwLock::new(assignments)),
        }
    }

    /// The platform's stock permission table, for tests and dev bootstrap
    pub fn with_defaults() -> Self {
        Self::new(vec![
            (UserRole::Admin, "user:create".to_string()),
            (UserRole::Admin, "user:read_all".to_string()),
            (UserRole::Admin, "course:view_all".to_string()),
            (UserRole::Teacher, "exam:create".to_string()),
            (UserRole::Teacher, "course:view_all".to_string()),
            (UserRole::Student, "enroll:submit".to_string()),
            (UserRole::Student, "course:view_all".to_string()),
        ])
    }

    /// Replace the served assignments
    pub async fn replace(&self, assignments: Vec<(UserRole, String)>) {
        *self.assignments.write().await = assignments;
    }
}

#[async_trait]
impl PermissionRepository for MockPermissionRepository {
    async fn load_role_permissions(&self) -> Result<Vec<(UserRole, String)>, DomainError> {
        Ok(self.assignments.read().await.clone())
    }
}
