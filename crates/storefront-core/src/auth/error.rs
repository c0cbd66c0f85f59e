use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("Secure storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read secret: {0}")]
    Read(String),

    #[error("Failed to write secret: {0}")]
    Write(String),

    #[error("Failed to clear secret: {0}")]
    Clear(String),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Login succeeded on the network but the token could not be stored.
    #[error("Could not establish the session securely. Please try again.")]
    PersistFailed(#[source] SecretStoreError),

    /// The stored token could not be removed; it may still be present.
    #[error("Could not end the session securely. Please try again.")]
    ClearFailed(#[source] SecretStoreError),
}

impl SessionError {
    /// HTTP status of the underlying API failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            SessionError::Api(e) => e.status(),
            _ => None,
        }
    }
}
