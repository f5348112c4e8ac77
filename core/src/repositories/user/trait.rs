//! User repository trait defining the interface for account persistence.
//!
//! Implementations handle the actual database operations while keeping the
//! abstraction boundary between domain and infrastructure layers.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations.
///
/// Soft-deleted accounts are filtered inside every lookup: to the rest of
/// the system a deleted user is indistinguishable from one that never
/// existed.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by phone number, excluding deleted accounts
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with this phone, or the account is deleted
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id, excluding deleted accounts
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Insert a new user and return it with its assigned id
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Insert failed (e.g. duplicate phone number)
    async fn insert(&self, new_user: NewUser) -> Result<User, DomainError>;
}
