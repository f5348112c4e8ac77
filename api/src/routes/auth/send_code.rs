use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use su_core::repositories::{PermissionRepository, RevokedTokenRepository, UserRepository};
use su_core::services::guard::LoginAttemptStore;
use su_core::services::sms::CodeStore;
use su_shared::utils::phone::mask_phone_number;

use crate::dto::auth::{SendCodeRequest, SendCodeResponse};
use crate::handlers::error::{to_error_response, validation_failure_response};
use crate::i18n::{code_sent_message, Language};
use crate::routes::AppState;

/// Handler for POST /api/v1/login/sms/send
///
/// Sends a verification code to the given phone number, subject to the
/// per-phone resend cooldown.
pub async fn send_code<U, S, B, C, P>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, B, C, P>>,
    request: web::Json<SendCodeRequest>,
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
            "[{}] Send code request failed validation: {:?}",
            request_id,
            errors.field_errors().keys().collect::<Vec<_>>()
        );
        return validation_failure_response(&errors, &req);
    }

    log::info!(
        "[{}] Sending verification code to {}",
        request_id,
        mask_phone_number(&request.phone)
    );

    match state.sms_service.send_verification_code(&request.phone).await {
        Ok(dispatch) => {
            log::info!(
                "[{}] Verification code sent to {}, message_id: {}",
                request_id,
                mask_phone_number(&request.phone),
                dispatch.message_id
            );
            let lang = Language::from_request(&req);
            HttpResponse::Ok().json(SendCodeResponse {
                message: code_sent_message(lang),
                expires_in: dispatch.expires_in_seconds,
                resend_after: dispatch.resend_after_seconds,
            })
        }
        Err(error) => {
            log::warn!(
                "[{}] Failed to send verification code to {}: {}",
                request_id,
                mask_phone_number(&request.phone),
                error
            );
            to_error_response(&error, &req)
        }
    }
}
