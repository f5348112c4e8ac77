//! One-time verification code entity for SMS login.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Wrong guesses allowed before a code is invalidated
pub const MAX_CODE_ATTEMPTS: u32 = 3;

/// Default code lifetime (5 minutes)
pub const DEFAULT_CODE_TTL_SECONDS: i64 = 300;

/// One-time verification code issued to a phone number.
///
/// At most one active code exists per phone; issuing a new code replaces
/// any previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Phone number this code was sent to
    pub phone: String,

    /// The 6-digit code
    pub code: String,

    /// Number of wrong guesses so far
    pub attempts: u32,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Creates a code issued now with the given lifetime
    pub fn new(phone: impl Into<String>, code: impl Into<String>, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            phone: phone.into(),
            code: code.into(),
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
        }
    }

    /// Checks if the code has expired at the given instant
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Constant-time comparison against a submitted code
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len()
            && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Registers a wrong guess; returns the number of attempts left
    pub fn record_mismatch(&mut self) -> u32 {
        self.attempts += 1;
        self.remaining_attempts()
    }

    /// Attempts left before the code is invalidated
    pub fn remaining_attempts(&self) -> u32 {
        MAX_CODE_ATTEMPTS.saturating_sub(self.attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_code() {
        let code = VerificationCode::new("13812345678", "123456", DEFAULT_CODE_TTL_SECONDS);

        assert_eq!(code.phone, "13812345678");
        assert_eq!(code.code.len(), CODE_LENGTH);
        assert_eq!(code.attempts, 0);
        assert!(!code.is_expired(Utc::now()));
        assert_eq!(code.expires_at - code.created_at, Duration::seconds(300));
    }

    #[test]
    fn test_matching() {
        let code = VerificationCode::new("13812345678", "123456", 300);
        assert!(code.matches("123456"));
        assert!(!code.matches("654321"));
        assert!(!code.matches("12345"));
        assert!(!code.matches(""));
    }

    #[test]
    fn test_expiry() {
        let code = VerificationCode::new("13812345678", "123456", 300);
        let past_expiry = code.expires_at + Duration::seconds(1);
        assert!(code.is_expired(past_expiry));
        assert!(!code.is_expired(code.expires_at));
    }

    #[test]
    fn test_attempt_accounting() {
        let mut code = VerificationCode::new("13812345678", "123456", 300);
        assert_eq!(code.remaining_attempts(), MAX_CODE_ATTEMPTS);

        assert_eq!(code.record_mismatch(), 2);
        assert_eq!(code.record_mismatch(), 1);
        assert_eq!(code.record_mismatch(), 0);
        // Saturates instead of wrapping
        assert_eq!(code.record_mismatch(), 0);
    }
}
