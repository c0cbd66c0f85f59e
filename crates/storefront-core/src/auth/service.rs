//! Session lifecycle on top of the authenticated client.
//!
//! States are anonymous and authenticated. Login moves to authenticated
//! only once the token is stored; logout moves back only once it is
//! cleared. A failed call leaves the stored token untouched.

use tracing::{info, warn};

use crate::api::AuthenticatedHttpClient;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use super::SessionError;

const REGISTER_PATH: &str = "/users";
const LOGIN_PATH: &str = "/auth/login";

#[derive(Clone)]
pub struct AuthSessionService {
    client: AuthenticatedHttpClient,
}

impl AuthSessionService {
    pub fn new(client: AuthenticatedHttpClient) -> Self {
        Self { client }
    }

    /// Create an account; the backend's description is returned unchanged
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, SessionError> {
        let response: RegisterResponse = self.client.post(REGISTER_PATH, request).await?;
        info!(success = response.success, "Registration completed");
        Ok(response)
    }

    /// Exchange credentials for a token and store it.
    ///
    /// A token the store refuses fails the whole login: without it the next
    /// request could not prove the session.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, SessionError> {
        let response: LoginResponse = self.client.post(LOGIN_PATH, credentials).await?;

        match response.token() {
            Some(token) => {
                self.client.secrets().set(token).await.map_err(|e| {
                    warn!(error = %e, "Failed to store session token");
                    SessionError::PersistFailed(e)
                })?;
                info!("Session established");
            }
            None => warn!("Login response carried no token, session not stored"),
        }

        Ok(response)
    }

    /// Remove the stored token. On failure the token may still be present.
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.client.secrets().clear().await.map_err(|e| {
            warn!(error = %e, "Failed to clear session token");
            SessionError::ClearFailed(e)
        })?;
        info!("Session ended");
        Ok(())
    }

    /// True iff a token is stored. An unreadable store counts as logged out,
    /// unlike request signing which proceeds without a token.
    pub async fn is_logged_in(&self) -> bool {
        match self.client.secrets().get().await {
            Ok(token) => token.is_some_and(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Could not read session token, treating as logged out");
                false
            }
        }
    }
}
