//! HTTP route handlers.
//!
//! Handlers are generic over the repository and store traits so the same
//! routes run against MySQL and Redis in production and against the
//! in-memory implementations in tests.

use std::sync::Arc;

use su_core::repositories::{PermissionRepository, RevokedTokenRepository, UserRepository};
use su_core::services::auth::AuthService;
use su_core::services::guard::{LoginAttemptStore, SecurityGuard};
use su_core::services::rbac::RolePermissionRegistry;
use su_core::services::sms::{CodeStore, SmsLoginService};

pub mod auth;
pub mod enroll;
pub mod maintenance;

/// Application state that holds shared services
pub struct AppState<U, S, B, C, P>
where
    U: UserRepository,
    S: LoginAttemptStore,
    B: RevokedTokenRepository,
    C: CodeStore,
    P: PermissionRepository,
{
    pub auth_service: Arc<AuthService<U, S, B>>,
    pub sms_service: Arc<SmsLoginService<U, C>>,
    pub security_guard: Arc<SecurityGuard<S, B>>,
    pub permissions: Arc<RolePermissionRegistry<P>>,
}
