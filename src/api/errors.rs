use serde_json::Value;
use thiserror::Error;

/// Client-side failure taxonomy. `Validation` never reached the network;
/// `Api` is an expected request failure carrying the backend's message;
/// `Unauthorized` means the global 401 policy already cleared the session.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("authentication required")]
    Unauthorized,
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The line shown to the person at the terminal.
    pub(crate) fn user_message(&self) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            ApiError::Network(_) => "Could not reach the server. Check your connection.".to_string(),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
        }
    }
}

/// Backend error bodies usually carry a `message`; fall back through the
/// shapes seen in the wild.
pub(crate) fn extract_error_message(payload: &Value) -> String {
    payload
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| payload.get("error").and_then(Value::as_str))
        .or_else(|| payload.get("detail").and_then(Value::as_str))
        .unwrap_or("Request failed")
        .to_string()
}
