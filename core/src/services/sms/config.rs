//! SMS login configuration.

use su_shared::config::SmsConfig;

use crate::domain::entities::verification_code::DEFAULT_CODE_TTL_SECONDS;

/// Timing knobs for verification code issuance.
#[derive(Debug, Clone)]
pub struct SmsLoginConfig {
    /// Code lifetime in seconds
    pub code_ttl_seconds: i64,

    /// Minimum interval between two sends to the same phone
    pub resend_interval_seconds: i64,
}

impl Default for SmsLoginConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
            resend_interval_seconds: 60,
        }
    }
}

impl From<&SmsConfig> for SmsLoginConfig {
    fn from(config: &SmsConfig) -> Self {
        Self {
            code_ttl_seconds: config.code_expiry_seconds,
            resend_interval_seconds: config.resend_interval_seconds,
        }
    }
}
