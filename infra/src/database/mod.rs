//! Database module - MySQL implementations using SQLx.
//!
//! Provides connection pool management and the repository pattern
//! implementations backing the domain traits.

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlPermissionRepository, MySqlRevokedTokenRepository, MySqlUserRepository};
