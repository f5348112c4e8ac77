//! SMS verification code configuration

use serde::{Deserialize, Serialize};

/// SMS login configuration: code lifetime, resend throttling, and the
/// delivery provider selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Delivery provider identifier ("console" or "http")
    pub provider: String,

    /// Verification code lifetime in seconds
    pub code_expiry_seconds: i64,

    /// Minimum interval between two sends to the same phone, in seconds
    pub resend_interval_seconds: i64,

    /// HTTP gateway endpoint (only used by the "http" provider)
    #[serde(default)]
    pub gateway_url: Option<String>,

    /// HTTP gateway API key (only used by the "http" provider)
    #[serde(default)]
    pub gateway_api_key: Option<String>,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("console"),
            code_expiry_seconds: 300,
            resend_interval_seconds: 60,
            gateway_url: None,
            gateway_api_key: None,
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let provider = std::env::var("SMS_PROVIDER").unwrap_or_else(|_| "console".to_string());
        let code_expiry_seconds = std::env::var("SMS_CODE_EXPIRY_SECONDS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .unwrap_or(300);
        let resend_interval_seconds = std::env::var("SMS_RATE_LIMIT_SECONDS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .unwrap_or(60);
        let gateway_url = std::env::var("SMS_GATEWAY_URL").ok();
        let gateway_api_key = std::env::var("SMS_GATEWAY_API_KEY").ok();

        Self {
            provider,
            code_expiry_seconds,
            resend_interval_seconds,
            gateway_url,
            gateway_api_key,
        }
    }
}
