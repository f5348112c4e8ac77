use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use su_core::domain::entities::user::UserRole;
use su_core::errors::AuthError;
use su_core::repositories::{PermissionRepository, RevokedTokenRepository, UserRepository};
use su_core::services::guard::LoginAttemptStore;
use su_core::services::sms::CodeStore;

use crate::dto::auth::CleanupResponse;
use crate::handlers::error::to_error_response;
use crate::middleware::auth::Authenticated;
use crate::routes::AppState;

/// Handler for POST /api/v1/maintenance/cleanup
///
/// Drops blacklist entries older than the retention window. Restricted
/// to super admins; the periodic background task performs the same
/// cleanup without this endpoint.
pub async fn cleanup<U, S, B, C, P>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, B, C, P>>,
    auth: Authenticated,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: LoginAttemptStore + 'static,
    B: RevokedTokenRepository + 'static,
    C: CodeStore + 'static,
    P: PermissionRepository + 'static,
{
    let request_id = Uuid::new_v4().to_string();
    let user = auth.0;

    if user.role != UserRole::SuperAdmin {
        log::warn!(
            "[{}] User {} with role {} denied blacklist cleanup",
            request_id,
            user.user_id,
            user.role.as_str()
        );
        return to_error_response(&AuthError::InsufficientPermissions.into(), &req);
    }

    match state.security_guard.cleanup_expired_blacklist().await {
        Ok(removed) => {
            log::info!(
                "[{}] Blacklist cleanup by user {} removed {} entries",
                request_id,
                user.user_id,
                removed
            );
            HttpResponse::Ok().json(CleanupResponse { removed })
        }
        Err(error) => {
            log::error!("[{}] Blacklist cleanup failed: {}", request_id, error);
            to_error_response(&error, &req)
        }
    }
}
