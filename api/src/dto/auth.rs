use serde::{Deserialize, Serialize};
use validator::Validate;

use su_core::domain::value_objects::{AuthSession, CurrentUser, SmsLoginResult};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordLoginRequest {
    /// Chinese mobile number, e.g. "13812345678"
    #[validate(length(min = 8, max = 16))]
    pub phone: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Chinese mobile number
    #[validate(length(min = 8, max = 16))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    /// Chinese mobile number
    #[validate(length(min = 8, max = 16))]
    pub phone: String,

    /// 6-digit verification code
    #[validate(length(equal = 6))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub user_id: i64,
    pub role: String,
    pub expires_in: i64,
    /// Present only for SMS logins that auto-provisioned the account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new_user: Option<bool>,
}

impl From<AuthSession> for LoginResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            token_type: "bearer".to_string(),
            user_id: session.user_id,
            role: session.role.as_str().to_string(),
            expires_in: session.expires_in,
            is_new_user: None,
        }
    }
}

impl From<SmsLoginResult> for LoginResponse {
    fn from(result: SmsLoginResult) -> Self {
        let mut response = Self::from(result.session);
        response.is_new_user = Some(result.is_new_user);
        response
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub message: String,
    pub expires_in: i64,
    /// Seconds until the same phone may request another code
    pub resend_after: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: i64,
    pub phone: String,
    pub name: String,
    pub role: String,
    pub status: String,
    /// Permission keys granted to the account's role
    pub permissions: Vec<String>,
}

impl ProfileResponse {
    pub fn new(user: &CurrentUser, permissions: Vec<String>) -> Self {
        Self {
            user_id: user.user_id,
            phone: user.phone.clone(),
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
            status: user.status.as_str().to_string(),
            permissions,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupResponse {
    /// Number of expired blacklist entries removed
    pub removed: u64,
}
