use super::{ProviderError, PushProvider};
use crate::config::FcmConfig;
use crate::models::{redact_token, FcmMessage};
use crate::services::metrics::record_gateway_call;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::Value;
use std::sync::Mutex;

/// Client for the legacy FCM HTTP endpoint.
pub struct FcmProvider {
    config: FcmConfig,
    client: Client,
}

impl FcmProvider {
    pub fn new(config: FcmConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    async fn post(&self, message: &FcmMessage) -> Result<Value, ProviderError> {
        let response = self
            .client
            .post(&self.config.gateway_url)
            .header(CONTENT_TYPE, "application/json")
            .header(
                AUTHORIZATION,
                format!("key={}", self.config.server_key.expose_secret()),
            )
            .json(message)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        // The reply must be JSON whatever the status.
        let result: Value = serde_json::from_slice(&body)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body: result,
            });
        }

        Ok(result)
    }
}

#[async_trait]
impl PushProvider for FcmProvider {
    async fn send(&self, message: &FcmMessage) -> Result<Value, ProviderError> {
        let outcome = self.post(message).await;

        match &outcome {
            Ok(_) => {
                record_gateway_call("success");
                tracing::debug!(
                    device_token = %redact_token(&message.to),
                    "FCM accepted push notification"
                );
            }
            Err(e) => {
                record_gateway_call(&e.metric_status());
                tracing::warn!(
                    device_token = %redact_token(&message.to),
                    error = %e,
                    "FCM call failed"
                );
            }
        }

        outcome
    }
}

enum MockReply {
    Success(Value),
    Upstream(u16, Value),
    Unreachable(String),
}

/// In-memory gateway for tests. Records every message it is asked to send.
pub struct MockPushProvider {
    reply: MockReply,
    sent: Mutex<Vec<FcmMessage>>,
}

impl MockPushProvider {
    /// Answer every call with `result`.
    pub fn succeeding(result: Value) -> Self {
        Self::with_reply(MockReply::Success(result))
    }

    /// Answer every call with a non-2xx `status` and `body`.
    pub fn rejecting(status: u16, body: Value) -> Self {
        Self::with_reply(MockReply::Upstream(status, body))
    }

    /// Fail every call as if the gateway could not be reached.
    pub fn unreachable(reason: &str) -> Self {
        Self::with_reply(MockReply::Unreachable(reason.to_string()))
    }

    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<FcmMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or_default()
    }
}

#[async_trait]
impl PushProvider for MockPushProvider {
    async fn send(&self, message: &FcmMessage) -> Result<Value, ProviderError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.clone());
        }

        tracing::info!(
            device_token = %redact_token(&message.to),
            title = %message.notification.title,
            "[MOCK] Push notification would be sent"
        );

        match &self.reply {
            MockReply::Success(result) => Ok(result.clone()),
            MockReply::Upstream(status, body) => Err(ProviderError::Upstream {
                status: *status,
                body: body.clone(),
            }),
            MockReply::Unreachable(reason) => Err(ProviderError::Connection(reason.clone())),
        }
    }
}
