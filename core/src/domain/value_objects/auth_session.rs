//! Authentication result value objects returned by the services.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::{User, UserRole, UserStatus};

/// Outcome of a successful credential check, before token issuance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Identifier of the authenticated account
    pub user_id: i64,

    /// Role at authentication time
    pub role: UserRole,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
        }
    }
}

/// Issued session returned after a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Signed JWT session token
    pub token: String,

    /// Identifier of the logged-in account
    pub user_id: i64,

    /// Role embedded in the token
    pub role: UserRole,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Result of an SMS code login, which may have created the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsLoginResult {
    /// The issued session
    pub session: AuthSession,

    /// Whether the account was auto-provisioned by this login
    pub is_new_user: bool,
}

/// Receipt for an accepted verification code send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDispatch {
    /// Provider-assigned message id
    pub message_id: String,

    /// Seconds until the sent code expires
    pub expires_in_seconds: i64,

    /// Seconds until the same phone may request another code
    pub resend_after_seconds: i64,
}

/// Identity resolved from a verified session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Identifier of the account
    pub user_id: i64,

    /// Phone number of the account
    pub phone: String,

    /// Display name
    pub name: String,

    /// Current role (re-read from storage, not the token)
    pub role: UserRole,

    /// Current lifecycle status
    pub status: UserStatus,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            phone: user.phone.clone(),
            name: user.name.clone(),
            role: user.role,
            status: user.status,
        }
    }
}
