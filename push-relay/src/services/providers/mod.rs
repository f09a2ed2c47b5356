pub mod push;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::FcmMessage;

pub use push::{FcmProvider, MockPushProvider};

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("{0}")]
    Connection(String),

    /// The gateway answered with something that is not JSON.
    #[error("{0}")]
    MalformedResponse(String),

    /// The gateway answered with a non-2xx status.
    #[error("FCM API error: {body}")]
    Upstream { status: u16, body: Value },
}

impl ProviderError {
    /// Label used for the `push_gateway_calls_total` counter.
    pub fn metric_status(&self) -> String {
        match self {
            ProviderError::Connection(_) => "connection_error".to_string(),
            ProviderError::MalformedResponse(_) => "malformed_response".to_string(),
            ProviderError::Upstream { status, .. } => status.to_string(),
        }
    }
}

/// A push gateway that accepts one message per call.
///
/// Implementations must not cache or deduplicate: each call is one request
/// to the gateway.
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Deliver `message`, returning the gateway's JSON reply on success.
    async fn send(&self, message: &FcmMessage) -> Result<Value, ProviderError>;
}
