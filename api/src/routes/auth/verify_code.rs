use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use su_core::repositories::{PermissionRepository, RevokedTokenRepository, UserRepository};
use su_core::services::guard::LoginAttemptStore;
use su_core::services::sms::CodeStore;
use su_shared::utils::phone::mask_phone_number;

use crate::dto::auth::{LoginResponse, VerifyCodeRequest};
use crate::handlers::error::{to_error_response, validation_failure_response};
use crate::routes::AppState;

/// Handler for POST /api/v1/login/sms/verify
///
/// Checks the submitted verification code and logs the phone number in,
/// provisioning a student account when the number is unknown.
pub async fn verify_code<U, S, B, C, P>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, B, C, P>>,
    request: web::Json<VerifyCodeRequest>,
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
            "[{}] Verify code request failed validation: {:?}",
            request_id,
            errors.field_errors().keys().collect::<Vec<_>>()
        );
        return validation_failure_response(&errors, &req);
    }

    log::info!(
        "[{}] SMS login attempt for {}",
        request_id,
        mask_phone_number(&request.phone)
    );

    match state
        .sms_service
        .verify_and_login(&request.phone, &request.code)
        .await
    {
        Ok(result) => {
            log::info!(
                "[{}] SMS login succeeded for user {} (new_user: {})",
                request_id,
                result.session.user_id,
                result.is_new_user
            );
            HttpResponse::Ok().json(LoginResponse::from(result))
        }
        Err(error) => {
            log::warn!(
                "[{}] SMS login failed for {}: {}",
                request_id,
                mask_phone_number(&request.phone),
                error
            );
            to_error_response(&error, &req)
        }
    }
}
