//! Redis-backed verification code storage.

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};

use su_core::domain::entities::verification_code::{VerificationCode, MAX_CODE_ATTEMPTS};
use su_core::errors::{DomainError, SecurityError};
use su_core::services::sms::{CodeCheck, CodeStore};

use super::redis_client::RedisClient;
use crate::InfrastructureError;

fn code_key(phone: &str) -> String {
    format!("sms:code:{}", phone)
}

fn attempts_key(phone: &str) -> String {
    format!("sms:attempts:{}", phone)
}

fn cooldown_key(phone: &str) -> String {
    format!("sms:cooldown:{}", phone)
}

/// Keeps stray guess counters from lingering after their code expired
const ATTEMPT_COUNTER_TTL_SECONDS: usize = 600;

fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn storage_error(e: InfrastructureError) -> DomainError {
    SecurityError::StorageFailed {
        message: e.to_string(),
    }
    .into()
}

/// Verification code state shared across API instances.
///
/// Only a SHA-256 digest of the code is stored; the plaintext exists in
/// the SMS message alone. Expiry is delegated to Redis key TTLs, so an
/// expired code simply stops existing and checks report `NotFound`.
#[derive(Clone)]
pub struct RedisCodeStore {
    client: RedisClient,
}

impl RedisCodeStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn store_code(&self, code: VerificationCode) -> Result<(), DomainError> {
        let ttl = (code.expires_at - Utc::now()).num_seconds().max(1) as usize;
        self.client
            .set_with_expiry(&code_key(&code.phone), &hash_code(&code.code), ttl)
            .await
            .map_err(storage_error)?;
        // A replaced code starts with a fresh guess budget
        self.client
            .delete(&attempts_key(&code.phone))
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn check_code(&self, phone: &str, submitted: &str) -> Result<CodeCheck, DomainError> {
        let stored = match self
            .client
            .get(&code_key(phone))
            .await
            .map_err(storage_error)?
        {
            Some(hash) => hash,
            None => return Ok(CodeCheck::NotFound),
        };

        if stored == hash_code(submitted) {
            self.client
                .delete(&code_key(phone))
                .await
                .map_err(storage_error)?;
            self.client
                .delete(&attempts_key(phone))
                .await
                .map_err(storage_error)?;
            return Ok(CodeCheck::Valid);
        }

        let wrong_guesses = self
            .client
            .increment(&attempts_key(phone), Some(ATTEMPT_COUNTER_TTL_SECONDS))
            .await
            .map_err(storage_error)?;
        let remaining = i64::from(MAX_CODE_ATTEMPTS)
            .saturating_sub(wrong_guesses)
            .max(0) as u32;

        if remaining == 0 {
            // Budget exhausted: the code is gone, not just mismatched
            self.client
                .delete(&code_key(phone))
                .await
                .map_err(storage_error)?;
            self.client
                .delete(&attempts_key(phone))
                .await
                .map_err(storage_error)?;
        }

        Ok(CodeCheck::Mismatch {
            remaining_attempts: remaining,
        })
    }

    async fn resend_cooldown_remaining(&self, phone: &str) -> Result<Option<i64>, DomainError> {
        let ttl = self
            .client
            .ttl(&cooldown_key(phone))
            .await
            .map_err(storage_error)?;
        Ok(if ttl > 0 { Some(ttl) } else { None })
    }

    async fn mark_sent(&self, phone: &str, cooldown_seconds: i64) -> Result<(), DomainError> {
        self.client
            .set_with_expiry(
                &cooldown_key(phone),
                "1",
                cooldown_seconds.max(1) as usize,
            )
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn clear(&self, phone: &str) -> Result<(), DomainError> {
        for key in [code_key(phone), attempts_key(phone), cooldown_key(phone)] {
            self.client.delete(&key).await.map_err(storage_error)?;
        }
        Ok(())
    }
}
