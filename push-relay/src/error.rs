use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::ProviderError;

/// Errors surfaced by the relay endpoint.
///
/// Every variant renders as `{"error": <message>}`. Only missing parameters
/// are a client error; an unparseable body shares the 500 path with gateway
/// failures.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Missing required parameters")]
    MissingParameters,

    #[error("{0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("Cannot read request parameters from a null body")]
    NullBody,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl RelayError {
    /// Label used for the `push_relay_requests_total` counter.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::MissingParameters => "missing_parameters",
            RelayError::MalformedInput(_) | RelayError::NullBody => "malformed_input",
            RelayError::Provider(_) => "gateway_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingParameters => StatusCode::BAD_REQUEST,
            RelayError::MalformedInput(_) | RelayError::NullBody | RelayError::Provider(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_parameters_is_a_bad_request() {
        let err = RelayError::MissingParameters;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Missing required parameters");
    }

    #[test]
    fn upstream_error_message_embeds_gateway_payload() {
        let err = RelayError::from(ProviderError::Upstream {
            status: 401,
            body: json!({"error": "InvalidKey"}),
        });

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), r#"FCM API error: {"error":"InvalidKey"}"#);
        assert_eq!(err.outcome(), "gateway_error");
    }

    #[test]
    fn malformed_input_uses_parser_message() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let expected = parse_err.to_string();
        let err = RelayError::from(parse_err);

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn null_body_is_an_internal_error() {
        let err = RelayError::NullBody;
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.outcome(), "malformed_input");
    }
}
