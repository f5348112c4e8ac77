use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use su_core::repositories::{PermissionRepository, RevokedTokenRepository, UserRepository};
use su_core::services::guard::LoginAttemptStore;
use su_core::services::sms::CodeStore;
use su_shared::utils::phone::mask_phone_number;

use crate::dto::auth::{LoginResponse, PasswordLoginRequest};
use crate::handlers::error::{to_error_response, validation_failure_response};
use crate::routes::AppState;

/// Handler for POST /api/v1/login/password
///
/// Checks the phone number and password, enforcing the per-identifier
/// lockout, and returns a signed session token on success.
pub async fn password_login<U, S, B, C, P>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, B, C, P>>,
    request: web::Json<PasswordLoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: LoginAttemptStore + 'static,
    B: RevokedTokenRepository + 'static,
    C: CodeStore + 'static,
    P: PermissionRepository + 'static,
{
    let request_id = Uuid::new_v4().to_string();

    if let Err(errors) = request.0.validate() {
        log::warn!(
            "[{}] Password login request failed validation: {:?}",
            request_id,
            errors.field_errors().keys().collect::<Vec<_>>()
        );
        return validation_failure_response(&errors, &req);
    }

    log::info!(
        "[{}] Password login attempt for {}",
        request_id,
        mask_phone_number(&request.phone)
    );

    match state
        .auth_service
        .login_with_password(&request.phone, &request.password)
        .await
    {
        Ok(session) => {
            log::info!(
                "[{}] Password login succeeded for user {}",
                request_id,
                session.user_id
            );
            HttpResponse::Ok().json(LoginResponse::from(session))
        }
        Err(error) => {
            log::warn!(
                "[{}] Password login failed for {}: {}",
                request_id,
                mask_phone_number(&request.phone),
                error
            );
            to_error_response(&error, &req)
        }
    }
}
