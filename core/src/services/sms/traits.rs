//! Delivery and storage traits for SMS login.

use async_trait::async_trait;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

/// Transport for outbound verification messages.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Submits a message to the gateway. `Ok` means the gateway accepted
    /// the message; the returned string is the provider's message id.
    async fn send(&self, phone: &str, message: &str) -> Result<String, DomainError>;
}

/// Outcome of checking a submitted verification code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeCheck {
    /// The code matched and has been consumed
    Valid,

    /// Wrong code; this many guesses remain before invalidation
    Mismatch { remaining_attempts: u32 },

    /// No active code: never sent, expired, consumed, or guessed away
    NotFound,
}

/// Storage for active verification codes and resend bookkeeping.
///
/// `check_code` owns the single-use guarantee: a match consumes the
/// code, and so does the wrong guess that exhausts the attempt budget.
/// Either way the next check reports [`CodeCheck::NotFound`].
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Stores a code, replacing any previous one for the same phone.
    async fn store_code(&self, code: VerificationCode) -> Result<(), DomainError>;

    /// Atomically checks a submitted code for the phone.
    async fn check_code(&self, phone: &str, submitted: &str) -> Result<CodeCheck, DomainError>;

    /// Seconds until this phone may be sent another code, if throttled.
    async fn resend_cooldown_remaining(&self, phone: &str) -> Result<Option<i64>, DomainError>;

    /// Starts the resend cooldown. Called only after the gateway accepted
    /// a message, never for failed sends.
    async fn mark_sent(&self, phone: &str, cooldown_seconds: i64) -> Result<(), DomainError>;

    /// Drops any active code and cooldown state for the phone.
    async fn clear(&self, phone: &str) -> Result<(), DomainError>;
}
