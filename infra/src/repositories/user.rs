//! In-memory implementation of UserRepository.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use su_core::domain::entities::user::{NewUser, User, UserStatus};
use su_core::errors::DomainError;
use su_core::repositories::UserRepository;

/// In-memory user repository backed by a map keyed on id.
///
/// Mirrors the MySQL implementation's visible behavior: deleted
/// accounts are invisible to lookups and duplicate phone numbers are
/// rejected on insert.
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: AtomicI64,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    /// Seed a user, assigning it the next free id
    pub async fn seed(&self, mut user: User) -> User {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        user.id = id;
        self.users.write().await.insert(id, user.clone());
        user
    }

    /// Number of stored users, deleted ones included
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.phone == phone && u.status != UserStatus::Deleted)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .get(&id)
            .filter(|u| u.status != UserStatus::Deleted)
            .cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.phone == new_user.phone && u.status != UserStatus::Deleted)
        {
            return Err(DomainError::Validation {
                message: "Phone number already registered".to_string(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let user = User {
            id,
            phone: new_user.phone,
            password_hash: new_user.password_hash,
            name: new_user.name,
            role: new_user.role,
            status: new_user.status,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, user.clone());
        Ok(user)
    }
}
