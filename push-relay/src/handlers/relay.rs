use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::error::RelayError;
use crate::models::{redact_token, SendPushRequest};
use crate::services::{record_relay_request, PushProvider};
use crate::startup::AppState;

#[derive(Debug, Serialize)]
pub struct SendPushResponse {
    pub success: bool,
    pub result: Value,
}

/// Relay one push notification to the gateway.
///
/// The body is read raw so that a malformed payload reaches the same error
/// boundary as gateway failures instead of axum's JSON rejection.
#[tracing::instrument(skip(state, body))]
pub async fn send_fcm_notification(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SendPushResponse>, RelayError> {
    let outcome = relay(state.push_provider.as_ref(), &body).await;

    match &outcome {
        Ok(_) => record_relay_request("success"),
        Err(e) => record_relay_request(e.outcome()),
    }

    outcome.map(|result| {
        Json(SendPushResponse {
            success: true,
            result,
        })
    })
}

async fn relay(provider: &dyn PushProvider, body: &[u8]) -> Result<Value, RelayError> {
    let request = SendPushRequest::parse(body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected unparseable relay request");
        e
    })?;

    let message = request.into_message().map_err(|e| {
        tracing::warn!("Relay request is missing required parameters");
        e
    })?;

    let result = provider.send(&message).await.map_err(|e| {
        tracing::error!(
            device_token = %redact_token(&message.to),
            error = %e,
            "Failed to relay push notification"
        );
        RelayError::Provider(e)
    })?;

    tracing::info!(
        device_token = %redact_token(&message.to),
        "Push notification relayed"
    );

    Ok(result)
}
