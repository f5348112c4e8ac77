//! Bilingual (English/Chinese) message rendering for API responses.
//!
//! The domain layer produces English-only errors; this module picks the
//! response language from the `Accept-Language` header and renders the
//! client-facing text.

use actix_web::http::header::ACCEPT_LANGUAGE;
use actix_web::HttpRequest;

use su_core::errors::{AuthError, DomainError, TokenError, ValidationError};

/// Response language negotiated from the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Chinese,
}

impl Language {
    pub fn from_header(header: Option<&str>) -> Self {
        match header {
            Some(lang) if lang.starts_with("zh") => Language::Chinese,
            _ => Language::English,
        }
    }

    pub fn from_request(req: &HttpRequest) -> Self {
        let header = req
            .headers()
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());
        Self::from_header(header)
    }
}

/// Client-facing text for a domain error.
///
/// Storage and internal failures deliberately render a generic message;
/// their detail stays in the server log.
pub fn localize(error: &DomainError, lang: Language) -> String {
    use Language::*;

    match error {
        DomainError::Auth(auth) => match (auth, lang) {
            (AuthError::AuthenticationFailed, English) => {
                "Invalid phone number or password".to_string()
            }
            (AuthError::AuthenticationFailed, Chinese) => "手机号或密码错误".to_string(),
            (AuthError::AccountLocked { remaining_seconds }, English) => format!(
                "Account locked. Try again in {} seconds",
                remaining_seconds
            ),
            (AuthError::AccountLocked { remaining_seconds }, Chinese) => {
                format!("账号已锁定，请在 {} 秒后重试", remaining_seconds)
            }
            (AuthError::AccountSuspended, English) => {
                "Account suspended. Contact support".to_string()
            }
            (AuthError::AccountSuspended, Chinese) => "账号已停用，请联系管理员".to_string(),
            (AuthError::UserNotFound, English) => "Account not found".to_string(),
            (AuthError::UserNotFound, Chinese) => "账号不存在".to_string(),
            (AuthError::RateLimitExceeded { retry_after_seconds }, English) => format!(
                "Too many requests. Retry after {} seconds",
                retry_after_seconds
            ),
            (AuthError::RateLimitExceeded { retry_after_seconds }, Chinese) => {
                format!("请求过于频繁，请在 {} 秒后重试", retry_after_seconds)
            }
            (AuthError::CodeNotFound, English) => {
                "Verification code not found or expired".to_string()
            }
            (AuthError::CodeNotFound, Chinese) => "验证码不存在或已过期".to_string(),
            (AuthError::CodeMismatch { remaining_attempts }, English) => format!(
                "Incorrect verification code, {} attempt(s) remaining",
                remaining_attempts
            ),
            (AuthError::CodeMismatch { remaining_attempts }, Chinese) => {
                format!("验证码错误，还可尝试 {} 次", remaining_attempts)
            }
            (AuthError::SmsDeliveryFailed, English) => {
                "Failed to send verification code. Please try again later".to_string()
            }
            (AuthError::SmsDeliveryFailed, Chinese) => "验证码发送失败，请稍后重试".to_string(),
            (AuthError::InsufficientPermissions, English) => "Insufficient permissions".to_string(),
            (AuthError::InsufficientPermissions, Chinese) => "权限不足".to_string(),
        },
        DomainError::Token(token) => match (token, lang) {
            (TokenError::TokenExpired, English) => {
                "Session expired. Please log in again".to_string()
            }
            (TokenError::TokenExpired, Chinese) => "登录已过期，请重新登录".to_string(),
            (TokenError::TokenRevoked, English) => "Session has been logged out".to_string(),
            (TokenError::TokenRevoked, Chinese) => "登录已注销".to_string(),
            (_, English) => "Invalid session token".to_string(),
            (_, Chinese) => "无效的登录凭证".to_string(),
        },
        DomainError::ValidationErr(validation) => match (validation, lang) {
            (ValidationError::RequiredField { field }, English) => {
                format!("Missing required field: {}", field)
            }
            (ValidationError::RequiredField { field }, Chinese) => {
                format!("缺少必填字段：{}", field)
            }
            (ValidationError::InvalidFormat { field }, English) => {
                format!("Invalid format: {}", field)
            }
            (ValidationError::InvalidFormat { field }, Chinese) => format!("格式无效：{}", field),
        },
        DomainError::Validation { message } => match lang {
            English => message.clone(),
            Chinese => "请求参数无效".to_string(),
        },
        DomainError::NotFound { resource } => match lang {
            English => format!("Not found: {}", resource),
            Chinese => format!("资源不存在：{}", resource),
        },
        DomainError::Database { .. } | DomainError::Internal { .. } | DomainError::Security(_) => {
            match lang {
                English => "Internal server error".to_string(),
                Chinese => "服务器内部错误".to_string(),
            }
        }
    }
}

/// Message for requests with no usable Authorization header
pub fn missing_token_message(lang: Language) -> String {
    match lang {
        Language::English => "Authentication required".to_string(),
        Language::Chinese => "需要登录".to_string(),
    }
}

/// Message for request bodies that fail field validation
pub fn invalid_request_message(lang: Language) -> String {
    match lang {
        Language::English => "Invalid request data".to_string(),
        Language::Chinese => "请求数据无效".to_string(),
    }
}

/// Success message for an accepted verification code send
pub fn code_sent_message(lang: Language) -> String {
    match lang {
        Language::English => "Verification code sent. Please check your SMS".to_string(),
        Language::Chinese => "验证码已发送，请查看短信".to_string(),
    }
}

/// Success message for logout
pub fn logged_out_message(lang: Language) -> String {
    match lang {
        Language::English => "Logged out successfully".to_string(),
        Language::Chinese => "已退出登录".to_string(),
    }
}
