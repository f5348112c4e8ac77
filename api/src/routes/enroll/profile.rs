use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use su_core::errors::AuthError;
use su_core::repositories::{PermissionRepository, RevokedTokenRepository, UserRepository};
use su_core::services::guard::LoginAttemptStore;
use su_core::services::sms::CodeStore;

use crate::dto::auth::ProfileResponse;
use crate::handlers::error::to_error_response;
use crate::middleware::auth::Authenticated;
use crate::routes::AppState;

/// Handler for GET /api/v1/enroll/my_profile
///
/// Returns the authenticated account's own profile. Requires the
/// `enroll:submit` permission, which every enrollable role carries.
pub async fn my_profile<U, S, B, C, P>(
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

    if !state
        .permissions
        .has_permission(user.role, "enroll:submit")
        .await
    {
        log::warn!(
            "[{}] User {} with role {} denied enroll:submit",
            request_id,
            user.user_id,
            user.role.as_str()
        );
        return to_error_response(&AuthError::InsufficientPermissions.into(), &req);
    }

    let permissions = state.permissions.permissions_for(user.role).await;

    log::info!("[{}] Profile read for user {}", request_id, user.user_id);
    HttpResponse::Ok().json(ProfileResponse::new(&user, permissions))
}
