use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use su_core::repositories::{PermissionRepository, RevokedTokenRepository, UserRepository};
use su_core::services::guard::LoginAttemptStore;
use su_core::services::sms::CodeStore;

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::to_error_response;
use crate::i18n::{logged_out_message, Language};
use crate::middleware::auth::{extract_bearer_token, missing_token_response};
use crate::routes::AppState;

/// Handler for POST /api/v1/logout
///
/// Reads the Authorization header itself instead of going through the
/// auth middleware, so a logout with an already expired token still
/// lands the token on the blacklist and reports success.
pub async fn logout<U, S, B, C, P>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, B, C, P>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: LoginAttemptStore + 'static,
    B: RevokedTokenRepository + 'static,
    C: CodeStore + 'static,
    P: PermissionRepository + 'static,
{
    let request_id = Uuid::new_v4().to_string();

    let token = match extract_bearer_token(req.headers()) {
        Some(token) => token,
        None => {
            log::warn!("[{}] Logout without a bearer token", request_id);
            return missing_token_response(&req);
        }
    };

    match state.auth_service.logout(&token).await {
        Ok(()) => {
            log::info!("[{}] Logout completed", request_id);
            let lang = Language::from_request(&req);
            HttpResponse::Ok().json(LogoutResponse {
                message: logged_out_message(lang),
            })
        }
        Err(error) => {
            log::warn!("[{}] Logout failed: {}", request_id, error);
            to_error_response(&error, &req)
        }
    }
}
