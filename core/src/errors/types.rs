//! Domain-specific error types for authentication and account security
//!
//! This module provides error type definitions for authentication, token
//! management, security bookkeeping, and validation. Error messages are
//! English-only; localization happens in the presentation layer.

use thiserror::Error;

/// Authentication-related errors
///
/// These errors represent the failure scenarios of password login, SMS login,
/// and account state checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Deliberately identical for unknown identifiers and wrong passwords so
    /// responses cannot be used to enumerate registered phone numbers.
    #[error("Invalid phone number or password")]
    AuthenticationFailed,

    #[error("Account locked, try again in {remaining_seconds} seconds")]
    AccountLocked { remaining_seconds: i64 },

    #[error("Account suspended")]
    AccountSuspended,

    #[error("User not found")]
    UserNotFound,

    #[error("Rate limit exceeded, retry after {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: i64 },

    #[error("Verification code not found or expired")]
    CodeNotFound,

    #[error("Incorrect verification code, {remaining_attempts} attempt(s) remaining")]
    CodeMismatch { remaining_attempts: u32 },

    #[error("Failed to deliver verification code")]
    SmsDeliveryFailed,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token-related errors
///
/// These errors represent JWT issuance and validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Invalid claims")]
    InvalidClaims,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },
}

/// Security bookkeeping errors
///
/// Raised when the guard cannot maintain its own state, for example when a
/// revoked token cannot be persisted. These always accompany an ERROR-level
/// security log entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    #[error("Failed to persist revoked token: {message}")]
    BlacklistPersistenceFailed { message: String },

    #[error("Security state storage failure: {message}")]
    StorageFailed { message: String },
}
