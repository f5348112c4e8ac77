//! In-memory repository implementations.
//!
//! Process-local implementations of the persistence traits, used by
//! integration tests and available for local development without a
//! database.

pub mod permission;
pub mod revoked_token;
pub mod user;

pub use permission::MockPermissionRepository;
pub use revoked_token::MockRevokedTokenRepository;
pub use user::MockUserRepository;
