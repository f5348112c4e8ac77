//! Mapping from domain errors to HTTP responses.
//!
//! Every [`DomainError`] maps to one status code and one stable error
//! code; the message text is localized per request. Retry and attempt
//! hints ride along in the `details` object.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use validator::ValidationErrors;

use su_core::errors::{AuthError, DomainError, TokenError};
use su_shared::errors::{error_codes, ErrorResponse};

use crate::i18n::{invalid_request_message, localize, Language};

/// Status code and stable error code for a domain error
pub fn status_and_code(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Auth(auth) => match auth {
            AuthError::AuthenticationFailed => {
                (StatusCode::UNAUTHORIZED, error_codes::AUTHENTICATION_FAILED)
            }
            AuthError::AccountLocked { .. } => (StatusCode::LOCKED, error_codes::ACCOUNT_LOCKED),
            AuthError::AccountSuspended => (StatusCode::FORBIDDEN, error_codes::ACCOUNT_SUSPENDED),
            AuthError::UserNotFound => (StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED),
            AuthError::RateLimitExceeded { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, error_codes::RATE_LIMIT_EXCEEDED)
            }
            AuthError::CodeNotFound => (StatusCode::BAD_REQUEST, error_codes::CODE_NOT_FOUND),
            AuthError::CodeMismatch { .. } => (StatusCode::BAD_REQUEST, error_codes::CODE_INVALID),
            AuthError::SmsDeliveryFailed => {
                (StatusCode::SERVICE_UNAVAILABLE, error_codes::SMS_DELIVERY_FAILED)
            }
            AuthError::InsufficientPermissions => (StatusCode::FORBIDDEN, error_codes::FORBIDDEN),
        },
        DomainError::Token(token) => match token {
            TokenError::TokenExpired => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_EXPIRED),
            TokenError::TokenRevoked => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_REVOKED),
            TokenError::TokenGenerationFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
            }
            _ => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_INVALID),
        },
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
            (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR)
        }
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        DomainError::Database { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::DATABASE_ERROR)
        }
        DomainError::Internal { .. } | DomainError::Security(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        }
    }
}

/// Renders a domain error as a localized JSON response
pub fn to_error_response(error: &DomainError, req: &HttpRequest) -> HttpResponse {
    let lang = Language::from_request(req);
    error_response_for(error, lang)
}

/// Renders a domain error for an already negotiated language
pub fn error_response_for(error: &DomainError, lang: Language) -> HttpResponse {
    let (status, code) = status_and_code(error);
    let mut body = ErrorResponse::new(code, localize(error, lang));

    match error {
        DomainError::Auth(AuthError::AccountLocked { remaining_seconds }) => {
            body = body.add_detail("remaining_seconds", remaining_seconds);
        }
        DomainError::Auth(AuthError::RateLimitExceeded { retry_after_seconds }) => {
            body = body.add_detail("retry_after_seconds", retry_after_seconds);
        }
        DomainError::Auth(AuthError::CodeMismatch { remaining_attempts }) => {
            body = body.add_detail("remaining_attempts", remaining_attempts);
        }
        _ => {}
    }

    HttpResponse::build(status).json(body)
}

/// Renders validator failures as a field-keyed VALIDATION_ERROR response
pub fn validation_failure_response(errors: &ValidationErrors, req: &HttpRequest) -> HttpResponse {
    let lang = Language::from_request(req);
    let mut body = ErrorResponse::new(error_codes::VALIDATION_ERROR, invalid_request_message(lang));

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        body = body.add_detail(field, messages);
    }

    HttpResponse::BadRequest().json(body)
}
