//! Application factory
//!
//! Builds the Actix-web application with middleware and routes so the
//! binary and the integration tests construct the exact same app.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{web, App, Error, HttpResponse};

use su_core::repositories::{PermissionRepository, RevokedTokenRepository, UserRepository};
use su_core::services::guard::LoginAttemptStore;
use su_core::services::sms::CodeStore;
use su_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::auth::{JwtAuth, TokenVerifier};
use crate::middleware::cors::create_cors;
use crate::middleware::security::SecurityMiddleware;
use crate::routes::auth::{
    logout::logout, password_login::password_login, send_code::send_code, verify_code::verify_code,
};
use crate::routes::enroll::profile::my_profile;
use crate::routes::maintenance::cleanup::cleanup;
use crate::routes::AppState;

/// Create and configure the application with all dependencies
pub fn create_app<U, S, B, C, P>(
    app_state: web::Data<AppState<U, S, B, C, P>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: LoginAttemptStore + 'static,
    B: RevokedTokenRepository + 'static,
    C: CodeStore + 'static,
    P: PermissionRepository + 'static,
{
    let cors = create_cors();
    let security = SecurityMiddleware::new();

    // The auth middleware verifies tokens through the same service the
    // logout handler revokes them with
    let verifier: Arc<dyn TokenVerifier> = app_state.auth_service.clone();

    App::new()
        .app_data(app_state)
        // Middleware order matters: security first, then CORS, then logging
        .wrap(Logger::default())
        .wrap(cors)
        .wrap(security)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/login")
                        .route("/password", web::post().to(password_login::<U, S, B, C, P>))
                        .route("/sms/send", web::post().to(send_code::<U, S, B, C, P>))
                        .route("/sms/verify", web::post().to(verify_code::<U, S, B, C, P>)),
                )
                // Deliberately outside JwtAuth: expired tokens must still
                // be accepted for logout
                .route("/logout", web::post().to(logout::<U, S, B, C, P>))
                .service(
                    web::scope("/enroll")
                        .wrap(JwtAuth::new(Arc::clone(&verifier)))
                        .route("/my_profile", web::get().to(my_profile::<U, S, B, C, P>)),
                )
                .service(
                    web::scope("/maintenance")
                        .wrap(JwtAuth::new(Arc::clone(&verifier)))
                        .route("/cleanup", web::post().to(cleanup::<U, S, B, C, P>)),
                )
                .route("/", web::get().to(api_documentation)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "skillup-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "SkillUp API v1",
        "endpoints": {
            "health": "/health",
            "login": {
                "password": {
                    "path": "/api/v1/login/password",
                    "method": "POST",
                    "description": "Log in with phone number and password"
                },
                "sms_send": {
                    "path": "/api/v1/login/sms/send",
                    "method": "POST",
                    "description": "Send an SMS verification code"
                },
                "sms_verify": {
                    "path": "/api/v1/login/sms/verify",
                    "method": "POST",
                    "description": "Log in with a verification code; registers unknown numbers"
                }
            },
            "logout": {
                "path": "/api/v1/logout",
                "method": "POST",
                "description": "Revoke the presented session token"
            },
            "enroll": {
                "my_profile": {
                    "path": "/api/v1/enroll/my_profile",
                    "method": "GET",
                    "description": "Profile of the logged-in account",
                    "requires_auth": true
                }
            },
            "maintenance": {
                "cleanup": {
                    "path": "/api/v1/maintenance/cleanup",
                    "method": "POST",
                    "description": "Purge expired blacklist entries (super admin only)",
                    "requires_auth": true
                }
            }
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
