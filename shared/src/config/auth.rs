//! Authentication configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Token lifetime in hours
    pub expiration_hours: i64,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            expiration_hours: 24,
            algorithm: default_algorithm(),
        }
    }
}

/// Placeholder secret shipped in development configurations. Deployments
/// must override it through `JWT_SECRET_KEY`.
pub const DEFAULT_SECRET: &str = "your-super-secret-jwt-key-change-in-production";

/// Minimum secret length before startup validation complains
pub const MIN_SECRET_LENGTH: usize = 32;

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token expiry in hours
    pub fn with_expiration_hours(mut self, hours: i64) -> Self {
        self.expiration_hours = hours;
        self
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET_KEY").unwrap_or_else(|_| DEFAULT_SECRET.to_string());
        let expiration_hours = std::env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);
        let algorithm = std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| default_algorithm());

        Self {
            secret,
            expiration_hours,
            algorithm,
        }
    }

    /// Check if using the shipped placeholder secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Check if the secret is long enough for HMAC signing
    pub fn is_secret_strong(&self) -> bool {
        self.secret.len() >= MIN_SECRET_LENGTH
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}
