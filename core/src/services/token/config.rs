//! Token service configuration.

use jsonwebtoken::Algorithm;
use su_shared::config::auth::DEFAULT_SECRET;
use su_shared::config::JwtConfig;

use crate::domain::entities::token::DEFAULT_TOKEN_EXPIRY_HOURS;
use crate::errors::{DomainError, DomainResult};

/// Signing configuration for [`super::TokenService`].
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Shared secret used for signing and verification
    pub secret: String,

    /// Signing algorithm, HS256 unless configured otherwise
    pub algorithm: Algorithm,

    /// Token lifetime in hours
    pub expiry_hours: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            algorithm: Algorithm::HS256,
            expiry_hours: DEFAULT_TOKEN_EXPIRY_HOURS,
        }
    }
}

impl TokenServiceConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Self::default()
        }
    }

    pub fn with_expiry_hours(mut self, hours: i64) -> Self {
        self.expiry_hours = hours;
        self
    }

    /// Build from the application-level JWT configuration.
    ///
    /// Fails when the configured algorithm name is not one jsonwebtoken
    /// recognizes.
    pub fn from_jwt_config(config: &JwtConfig) -> DomainResult<Self> {
        let algorithm = config
            .algorithm
            .parse::<Algorithm>()
            .map_err(|_| DomainError::Validation {
                message: format!("Unsupported JWT algorithm: {}", config.algorithm),
            })?;

        Ok(Self {
            secret: config.secret.clone(),
            algorithm,
            expiry_hours: config.expiration_hours,
        })
    }
}
