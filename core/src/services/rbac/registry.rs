//! Role-to-permission lookup backed by storage.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::domain::entities::user::UserRole;
use crate::errors::DomainResult;
use crate::repositories::PermissionRepository;

/// Cached role-to-permission assignments.
///
/// Assignments are loaded from the repository into memory and consulted
/// on every permission check. [`reload`](Self::reload) swaps in a fresh
/// snapshot so grants can change without a restart. Super admins bypass
/// the table entirely.
pub struct RolePermissionRegistry<P> {
    repository: Arc<P>,
    cache: RwLock<HashMap<UserRole, HashSet<String>>>,
}

impl<P> RolePermissionRegistry<P>
where
    P: PermissionRepository,
{
    /// Creates an empty registry; call [`reload`](Self::reload) to populate it.
    pub fn new(repository: Arc<P>) -> Self {
        Self {
            repository,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Replaces the cached assignments with the repository's current
    /// state. Returns the number of assignments loaded.
    pub async fn reload(&self) -> DomainResult<usize> {
        let assignments = self.repository.load_role_permissions().await?;
        let count = assignments.len();

        let mut map: HashMap<UserRole, HashSet<String>> = HashMap::new();
        for (role, permission) in assignments {
            map.entry(role).or_default().insert(permission);
        }

        *self.cache.write().await = map;
        info!(count, event = "permissions_reloaded", "Role permissions loaded");
        Ok(count)
    }

    /// Whether `role` holds `permission`.
    pub async fn has_permission(&self, role: UserRole, permission: &str) -> bool {
        if role == UserRole::SuperAdmin {
            return true;
        }
        self.cache
            .read()
            .await
            .get(&role)
            .map(|granted| granted.contains(permission))
            .unwrap_or(false)
    }

    /// Sorted permission keys for `role`. Super admins report every key
    /// known to the registry.
    pub async fn permissions_for(&self, role: UserRole) -> Vec<String> {
        let cache = self.cache.read().await;
        let mut permissions: Vec<String> = if role == UserRole::SuperAdmin {
            cache.values().flatten().cloned().collect()
        } else {
            cache
                .get(&role)
                .map(|granted| granted.iter().cloned().collect())
                .unwrap_or_default()
        };
        permissions.sort();
        permissions.dedup();
        permissions
    }
}
