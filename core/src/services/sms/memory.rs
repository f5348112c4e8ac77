//! In-memory code store for single-instance deployments and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use super::traits::{CodeCheck, CodeStore};
use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

#[derive(Default)]
struct Inner {
    codes: HashMap<String, VerificationCode>,
    cooldowns: HashMap<String, DateTime<Utc>>,
}

/// Mutex-protected map of active verification codes.
///
/// Expired codes are dropped lazily, on the next check or send for the
/// same phone.
#[derive(Default)]
pub struct InMemoryCodeStore {
    inner: Mutex<Inner>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CodeStore for InMemoryCodeStore {
    async fn store_code(&self, code: VerificationCode) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().await;
        inner.codes.insert(code.phone.clone(), code);
        Ok(())
    }

    async fn check_code(&self, phone: &str, submitted: &str) -> Result<CodeCheck, DomainError> {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();

        let outcome = match inner.codes.get_mut(phone) {
            None => return Ok(CodeCheck::NotFound),
            Some(code) if code.is_expired(now) => CodeCheck::NotFound,
            Some(code) if code.matches(submitted) => CodeCheck::Valid,
            Some(code) => CodeCheck::Mismatch {
                remaining_attempts: code.record_mismatch(),
            },
        };

        let consumed = match outcome {
            CodeCheck::NotFound | CodeCheck::Valid => true,
            CodeCheck::Mismatch { remaining_attempts } => remaining_attempts == 0,
        };
        if consumed {
            inner.codes.remove(phone);
        }

        Ok(outcome)
    }

    async fn resend_cooldown_remaining(&self, phone: &str) -> Result<Option<i64>, DomainError> {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();

        match inner.cooldowns.get(phone).copied() {
            Some(until) if now < until => Ok(Some((until - now).num_seconds().max(1))),
            Some(_) => {
                inner.cooldowns.remove(phone);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn mark_sent(&self, phone: &str, cooldown_seconds: i64) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().await;
        let until = Utc::now() + Duration::seconds(cooldown_seconds);
        inner.cooldowns.insert(phone.to_string(), until);
        Ok(())
    }

    async fn clear(&self, phone: &str) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().await;
        inner.codes.remove(phone);
        inner.cooldowns.remove(phone);
        Ok(())
    }
}
