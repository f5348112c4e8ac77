//! HTTP gateway SMS sender for production delivery.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use su_core::errors::DomainError;
use su_core::services::sms::SmsSender;
use su_shared::utils::phone::mask_phone_number;

use crate::InfrastructureError;

/// Timeout for gateway requests
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Serialize)]
struct GatewayRequest<'a> {
    phone: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct GatewayResponse {
    #[serde(default)]
    message_id: Option<String>,
}

/// SMS sender that POSTs messages to an HTTP SMS gateway.
///
/// The gateway receives `{"phone": ..., "message": ...}` as JSON and is
/// expected to answer 2xx with an optional `message_id` field. Any
/// non-success status is treated as a delivery failure.
pub struct HttpGatewaySmsSender {
    client: reqwest::Client,
    gateway_url: String,
    api_key: Option<String>,
}

impl HttpGatewaySmsSender {
    pub fn new(
        gateway_url: String,
        api_key: Option<String>,
    ) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                InfrastructureError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            gateway_url,
            api_key,
        })
    }
}

#[async_trait]
impl SmsSender for HttpGatewaySmsSender {
    async fn send(&self, phone: &str, message: &str) -> Result<String, DomainError> {
        let mut request = self
            .client
            .post(&self.gateway_url)
            .json(&GatewayRequest { phone, message });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!(
                event = "sms_gateway_unreachable",
                phone = %mask_phone_number(phone),
                error = %e,
                "SMS gateway request failed"
            );
            DomainError::Internal {
                message: format!("SMS gateway request failed: {}", e),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                event = "sms_gateway_rejected",
                phone = %mask_phone_number(phone),
                status = %status,
                "SMS gateway rejected the message"
            );
            return Err(DomainError::Internal {
                message: format!("SMS gateway returned status {}", status),
            });
        }

        let body: GatewayResponse = response.json().await.unwrap_or(GatewayResponse {
            message_id: None,
        });
        let message_id = body
            .message_id
            .unwrap_or_else(|| format!("gateway-{}", chrono::Utc::now().timestamp_millis()));

        info!(
            event = "sms_gateway_accepted",
            phone = %mask_phone_number(phone),
            message_id = %message_id,
            "SMS gateway accepted the message"
        );

        Ok(message_id)
    }
}
