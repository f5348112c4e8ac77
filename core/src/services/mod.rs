//! Business services containing the authentication use cases.
//!
//! Services are generic over the repository traits in
//! [`crate::repositories`] so they can be wired to MySQL and Redis in
//! production and to in-memory fakes in tests.

pub mod auth;
pub mod guard;
pub mod password;
pub mod rbac;
pub mod sms;
pub mod token;

pub use auth::AuthService;
pub use guard::{InMemoryAttemptStore, LoginAttemptStore, SecurityGuard, SecurityGuardConfig};
pub use password::PasswordHasher;
pub use rbac::RolePermissionRegistry;
pub use sms::{CodeCheck, CodeStore, InMemoryCodeStore, SmsLoginConfig, SmsLoginService, SmsSender};
pub use token::{TokenService, TokenServiceConfig};
