use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RelayError;

/// Inbound relay request, read field by field from an arbitrary JSON body.
///
/// Fields keep their raw JSON value: truthy values of any type are forwarded
/// as given, falsy ones (absent, `null`, `false`, `0`, `""`) count as missing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SendPushRequest {
    pub token: Option<Value>,
    pub title: Option<Value>,
    pub body: Option<Value>,
    pub data: Option<Value>,
}

impl SendPushRequest {
    /// Parse a raw request body.
    ///
    /// Invalid JSON and a literal `null` body are malformed input. Any other
    /// body is accepted here; arrays and primitives simply carry no fields.
    pub fn parse(body: &[u8]) -> Result<Self, RelayError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, RelayError> {
        if value.is_null() {
            return Err(RelayError::NullBody);
        }

        let field = |name: &str| value.get(name).cloned();

        Ok(Self {
            token: field("token"),
            title: field("title"),
            body: field("body"),
            data: field("data"),
        })
    }

    /// Validate the required fields and build the gateway payload.
    pub fn into_message(self) -> Result<FcmMessage, RelayError> {
        let (Some(token), Some(title), Some(body)) = (
            truthy(self.token),
            truthy(self.title),
            truthy(self.body),
        ) else {
            return Err(RelayError::MissingParameters);
        };

        Ok(FcmMessage {
            to: token,
            notification: FcmNotification { title, body },
            data: truthy(self.data).unwrap_or_else(|| Value::Object(Map::new())),
            priority: FcmMessage::PRIORITY.to_string(),
            content_available: true,
        })
    }
}

fn truthy(value: Option<Value>) -> Option<Value> {
    value.filter(is_truthy)
}

/// JavaScript truthiness for a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Payload for the legacy FCM HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcmMessage {
    pub to: Value,
    pub notification: FcmNotification,
    pub data: Value,
    pub priority: String,
    pub content_available: bool,
}

impl FcmMessage {
    pub const PRIORITY: &'static str = "high";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcmNotification {
    pub title: Value,
    pub body: Value,
}

/// Shorten a device token for log output.
pub fn redact_token(token: &Value) -> String {
    let Some(token) = token.as_str() else {
        return "***".to_string();
    };

    let tail: String = token
        .chars()
        .rev()
        .take(6)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    if tail.len() == token.len() {
        "***".to_string()
    } else {
        format!("***{}", tail)
    }
}
