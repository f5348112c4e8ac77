//! Mock implementation of PermissionRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::UserRole;
use crate::errors::DomainError;

use super::trait_::PermissionRepository;

/// Mock permission repository serving a fixed assignment list
pub struct MockPermissionRepository {
    assignments: Arc<RwLock<Vec<(UserRole, String)>>>,
}

impl MockPermissionRepository {
    pub fn new(assignments: Vec<(UserRole, String)>) -> Self {
        Self {
            assignments: Arc::new(RwLock::new(assignments)),
        }
    }

    /// Replace the served assignments, for reload tests
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
