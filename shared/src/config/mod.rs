//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing configuration
//! - `cache` - Redis configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `security` - Login throttling and token blacklist configuration
//! - `server` - HTTP server and CORS configuration
//! - `sms` - Verification code delivery configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod security;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use security::SecurityConfig;
pub use server::{CorsConfig, ServerConfig};
pub use sms::SmsConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Login throttling and blacklist configuration
    pub security: SecurityConfig,

    /// SMS verification configuration
    pub sms: SmsConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            jwt: JwtConfig::default(),
            security: SecurityConfig::default(),
            sms: SmsConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let cors = if environment.is_development() {
            CorsConfig::development()
        } else {
            CorsConfig::default()
        };

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            jwt: JwtConfig::from_env(),
            security: SecurityConfig::from_env(),
            sms: SmsConfig::from_env(),
            cors,
        }
    }

    /// Validate the configuration, returning human-readable problems.
    ///
    /// Problems are warnings in development; deployments should refuse to
    /// start in production when any is present.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.jwt.is_using_default_secret() {
            problems.push(
                "JWT_SECRET_KEY is using the default value; set a real secret before deploying"
                    .to_string(),
            );
        }
        if !self.jwt.is_secret_strong() {
            problems.push(format!(
                "JWT_SECRET_KEY is shorter than {} characters; use a longer random secret",
                auth::MIN_SECRET_LENGTH
            ));
        }
        if self.security.max_login_attempts == 0 {
            problems.push("MAX_LOGIN_ATTEMPTS must be at least 1".to_string());
        }
        if self.sms.provider == "http" && self.sms.gateway_url.is_none() {
            problems.push("SMS_PROVIDER is 'http' but SMS_GATEWAY_URL is not set".to_string());
        }

        problems
    }
}
