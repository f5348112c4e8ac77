//! Capturing SMS sender for integration tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use su_core::errors::DomainError;
use su_core::services::sms::SmsSender;

/// SMS sender that records messages instead of delivering them.
///
/// Tests read the captured messages back to drive the verification
/// flow; `fail_sends` simulates a gateway outage.
pub struct MockSmsSender {
    sent: Mutex<Vec<(String, String)>>,
    fail_sends: AtomicBool,
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_sends: AtomicBool::new(false),
        }
    }

    /// Make subsequent sends fail
    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Extracts the verification code from the most recent message
    pub async fn last_code(&self) -> Option<String> {
        let sent = self.sent.lock().await;
        let (_, message) = sent.last()?;
        message
            .split_whitespace()
            .map(|word| word.trim_end_matches('.'))
            .find(|word| word.len() == 6 && word.chars().all(|c| c.is_ascii_digit()))
            .map(|word| word.to_string())
    }
}

impl Default for MockSmsSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsSender for MockSmsSender {
    async fn send(&self, phone: &str, message: &str) -> Result<String, DomainError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "simulated gateway outage".to_string(),
            });
        }

        let mut sent = self.sent.lock().await;
        sent.push((phone.to_string(), message.to_string()));
        Ok(format!("mock-{}", sent.len()))
    }
}
