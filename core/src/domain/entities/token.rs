//! JWT claims for session tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserRole;
use crate::errors::TokenError;

/// Default session token lifetime (24 hours)
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id, rendered as a string)
    pub sub: String,

    /// Role of the user at issuance time
    pub role: UserRole,

    /// Issued at timestamp (Unix seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a session token issued now
    pub fn new(user_id: i64, role: UserRole, expiry_hours: i64) -> Self {
        Self::issued_at(user_id, role, expiry_hours, Utc::now())
    }

    /// Creates claims anchored at an explicit issuance instant
    pub fn issued_at(
        user_id: i64,
        role: UserRole,
        expiry_hours: i64,
        now: DateTime<Utc>,
    ) -> Self {
        let expiry = now + Duration::hours(expiry_hours);
        Self {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user id from the subject claim
    pub fn user_id(&self) -> Result<i64, TokenError> {
        self.sub.parse().map_err(|_| TokenError::InvalidClaims)
    }
}
