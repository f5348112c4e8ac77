//! MySQL repository implementations.

pub mod permission_repository;
pub mod revoked_token_repository;
pub mod user_repository;

pub use permission_repository::MySqlPermissionRepository;
pub use revoked_token_repository::MySqlRevokedTokenRepository;
pub use user_repository::MySqlUserRepository;
