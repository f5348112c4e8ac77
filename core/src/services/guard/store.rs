//! Storage trait for per-identifier login attempt state.

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::entities::login_attempt::LoginAttemptRecord;
use crate::errors::DomainError;

/// Persistence for failed-login tracking.
///
/// Keyed by the login identifier (phone number). Each method must apply
/// its change atomically per identifier; the in-memory implementation
/// holds a mutex, the Redis implementation relies on scripted updates.
#[async_trait]
pub trait LoginAttemptStore: Send + Sync {
    /// Registers a failed attempt and returns the updated record.
    ///
    /// An absent record or one whose lockout has already expired starts
    /// over at a single failure (see [`LoginAttemptRecord::apply_failure`]).
    async fn record_failure(
        &self,
        identifier: &str,
        threshold: u32,
        lockout: Duration,
    ) -> Result<LoginAttemptRecord, DomainError>;

    /// Fetches the current record, if any.
    async fn get(&self, identifier: &str) -> Result<Option<LoginAttemptRecord>, DomainError>;

    /// Removes all state for the identifier.
    async fn clear(&self, identifier: &str) -> Result<(), DomainError>;
}
