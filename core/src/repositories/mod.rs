pub mod permission;
pub mod revoked_token;
pub mod user;

pub use permission::PermissionRepository;
pub use revoked_token::RevokedTokenRepository;
pub use user::UserRepository;
