use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// No response was received (connectivity, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status
    #[error("Status {status}: {}", truncate_body(.body))]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to serialize request: {0}")]
    Serialization(String),

    /// The local HTTP client could not be set up (TLS backend, builder options)
    #[error("Failed to initialize HTTP client: {0}")]
    Client(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Truncate a response body to avoid logging excessive data
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        body.to_string()
    } else {
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }
}

impl ApiError {
    pub fn from_status(status: u16, body: &str) -> Self {
        ApiError::Status {
            status,
            body: body.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's error payload parsed as JSON, if it is JSON
    pub fn body_json(&self) -> Option<Value> {
        match self {
            ApiError::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// The `message` field of the backend's error payload.
    /// Validation errors arrive as an array of messages and are joined.
    pub fn server_message(&self) -> Option<String> {
        match self.body_json()?.get("message")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Array(items) if !items.is_empty() => Some(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Value::Null | Value::String(_) | Value::Array(_) => None,
            other => Some(other.to_string()),
        }
    }
}
