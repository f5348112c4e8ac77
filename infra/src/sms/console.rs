//! Console SMS sender for development environments.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::info;

use su_core::errors::DomainError;
use su_core::services::sms::SmsSender;
use su_shared::utils::phone::mask_phone_number;

/// SMS sender that logs messages instead of delivering them.
///
/// The message body is logged in full so the verification code can be
/// read straight from the application log; the phone number is masked.
pub struct ConsoleSmsSender {
    message_count: AtomicU64,
}

impl ConsoleSmsSender {
    pub fn new() -> Self {
        Self {
            message_count: AtomicU64::new(0),
        }
    }
}

impl Default for ConsoleSmsSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsSender for ConsoleSmsSender {
    async fn send(&self, phone: &str, message: &str) -> Result<String, DomainError> {
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        let message_id = format!("console-{}", count);

        info!(
            event = "sms_console_delivery",
            phone = %mask_phone_number(phone),
            message_id = %message_id,
            content = %message,
            "Console SMS delivery"
        );

        Ok(message_id)
    }
}
