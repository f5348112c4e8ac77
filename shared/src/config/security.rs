//! Login throttling and token blacklist configuration

use serde::{Deserialize, Serialize};

/// Account security configuration: failed-login throttling and the
/// revoked-token retention window.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityConfig {
    /// Failed attempts before an identifier is locked out
    pub max_login_attempts: u32,

    /// Lockout duration in minutes once the threshold is reached
    pub lockout_duration_minutes: i64,

    /// Days a revoked token stays in the blacklist before cleanup
    pub blacklist_retention_days: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: 5,
            lockout_duration_minutes: 15,
            blacklist_retention_days: 30,
        }
    }
}

impl SecurityConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let max_login_attempts = std::env::var("MAX_LOGIN_ATTEMPTS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);
        let lockout_duration_minutes = std::env::var("LOGIN_LOCKOUT_MINUTES")
            .unwrap_or_else(|_| "15".to_string())
            .parse()
            .unwrap_or(15);
        let blacklist_retention_days = std::env::var("JWT_BLACKLIST_CLEANUP_DAYS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Self {
            max_login_attempts,
            lockout_duration_minutes,
            blacklist_retention_days,
        }
    }

    /// Set the failed-attempt threshold
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_login_attempts = attempts;
        self
    }

    /// Set the lockout duration in minutes
    pub fn with_lockout_minutes(mut self, minutes: i64) -> Self {
        self.lockout_duration_minutes = minutes;
        self
    }
}
