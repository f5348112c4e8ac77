//! Security guard configuration.

use chrono::Duration;
use su_shared::config::SecurityConfig;

/// Thresholds for login throttling and blacklist retention.
#[derive(Debug, Clone)]
pub struct SecurityGuardConfig {
    /// Consecutive failures that trigger a lockout
    pub max_login_attempts: u32,

    /// Length of the lockout window in minutes
    pub lockout_duration_minutes: i64,

    /// How long revoked token hashes are kept before cleanup removes them
    pub blacklist_retention_days: i64,
}

impl Default for SecurityGuardConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: 5,
            lockout_duration_minutes: 15,
            blacklist_retention_days: 30,
        }
    }
}

impl From<&SecurityConfig> for SecurityGuardConfig {
    fn from(config: &SecurityConfig) -> Self {
        Self {
            max_login_attempts: config.max_login_attempts,
            lockout_duration_minutes: config.lockout_duration_minutes,
            blacklist_retention_days: config.blacklist_retention_days,
        }
    }
}

impl SecurityGuardConfig {
    pub fn lockout_duration(&self) -> Duration {
        Duration::minutes(self.lockout_duration_minutes)
    }

    pub fn blacklist_retention(&self) -> Duration {
        Duration::days(self.blacklist_retention_days)
    }
}
