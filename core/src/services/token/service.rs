//! JWT issuance and validation.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use su_shared::config::JwtConfig;

use super::config::TokenServiceConfig;
use crate::domain::entities::token::Claims;
use crate::domain::entities::user::UserRole;
use crate::errors::{DomainResult, TokenError};

/// Issues and validates HS256 session tokens.
///
/// Validation here is purely cryptographic and temporal. Revocation is
/// the [`crate::services::SecurityGuard`]'s concern and is checked by
/// the auth service before any decode work happens.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        // expiry is enforced exactly, with no clock leeway
        validation.leeway = 0;
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn from_jwt_config(config: &JwtConfig) -> DomainResult<Self> {
        Ok(Self::new(TokenServiceConfig::from_jwt_config(config)?))
    }

    /// Issue a signed session token for the given user.
    pub fn issue(&self, user_id: i64, role: UserRole) -> DomainResult<String> {
        let claims = Claims::new(user_id, role, self.config.expiry_hours);
        self.encode_claims(&claims)
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> DomainResult<String> {
        encode(&Header::new(self.config.algorithm), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, event = "token_generation_failed", "Failed to sign session token");
            TokenError::TokenGenerationFailed.into()
        })
    }

    /// Validate a token's signature and expiry, returning its claims.
    ///
    /// Expired tokens map to [`TokenError::TokenExpired`], bad signatures
    /// to [`TokenError::InvalidSignature`], and anything else that fails
    /// to decode to [`TokenError::MalformedToken`].
    pub fn validate(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| Self::map_decode_error(&e).into())
    }

    /// Decode a token while skipping the expiry check.
    ///
    /// The signature is still verified. Used when logging out with an
    /// expired token, where the identity is wanted for the audit trail.
    pub fn decode_ignoring_expiry(&self, token: &str) -> DomainResult<Claims> {
        let mut validation = Validation::new(self.config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = false;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::map_decode_error(&e).into())
    }

    /// Configured token lifetime in seconds, as reported to clients.
    pub fn expiry_seconds(&self) -> i64 {
        self.config.expiry_hours * 3600
    }

    fn map_decode_error(error: &jsonwebtoken::errors::Error) -> TokenError {
        match error.kind() {
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::MalformedToken,
        }
    }
}
