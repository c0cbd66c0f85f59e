//! User-facing copy for failed calls.

use crate::api::ApiError;
use crate::auth::SessionError;

const GENERIC_TITLE: &str = "Error";
const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    pub title: String,
    pub message: String,
}

impl UserMessage {
    fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn from_session_error(err: &SessionError) -> Self {
        match err {
            SessionError::Api(api) => Self::from_api_error(api),
            SessionError::PersistFailed(_) => Self::new(
                "Security error",
                "Your session could not be saved securely. This may be a problem with the \
                 device configuration. Please try again or contact support.",
            ),
            SessionError::ClearFailed(_) => Self::new(
                "Security error",
                "Your session could not be closed securely. Please try again.",
            ),
        }
    }

    pub fn from_api_error(err: &ApiError) -> Self {
        match err {
            ApiError::Network(_) => Self::new(
                "Connection error",
                "Could not reach the server. Check your internet connection and try again.",
            ),
            ApiError::Status { status, .. } => match *status {
                401 => Self::new(
                    "Incorrect credentials",
                    "The email or password is incorrect. Check your details and try again.",
                ),
                400 => Self::new("Invalid data", "Please check that the submitted data is correct."),
                404 => Self::new("Not found", "No account exists with this email."),
                409 => Self::new("Already registered", "An account with this email already exists."),
                422 => Self::new(
                    "Invalid data",
                    &err.server_message()
                        .unwrap_or_else(|| "Some fields are not valid. Please review the form.".to_string()),
                ),
                500 => Self::new("Server error", "Internal server error. Please try again later."),
                _ => match err.server_message() {
                    Some(message) => Self::new(GENERIC_TITLE, &message),
                    None => Self::new(GENERIC_TITLE, GENERIC_MESSAGE),
                },
            },
            ApiError::InvalidResponse(_) | ApiError::Serialization(_) | ApiError::Client(_) => {
                Self::new(GENERIC_TITLE, GENERIC_MESSAGE)
            }
        }
    }
}

impl std::fmt::Display for UserMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
