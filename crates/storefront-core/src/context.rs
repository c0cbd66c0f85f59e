//! Process-wide session context.
//!
//! Built once at startup and handed to every consumer. Both services
//! share one secret store and one client, so every request is signed with
//! the same token.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::api::{AuthenticatedHttpClient, ReqwestTransport, Transport, UserService};
use crate::auth::{AuthSessionService, KeyringSecretStore, SecretStore};
use crate::config::Config;

#[derive(Clone)]
pub struct SessionContext {
    pub auth: AuthSessionService,
    pub users: UserService,
}

impl SessionContext {
    /// Production wiring: reqwest transport and the OS keychain
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.api_base_url, config.request_timeout())
            .context("Failed to create HTTP client")?;
        let secrets = KeyringSecretStore::new().context("Failed to open the OS keychain")?;
        info!(base_url = %config.api_base_url, timeout_secs = config.request_timeout_secs, "Session context created");
        Ok(Self::new(Arc::new(transport), Arc::new(secrets)))
    }

    pub fn new(transport: Arc<dyn Transport>, secrets: Arc<dyn SecretStore>) -> Self {
        let client = AuthenticatedHttpClient::new(transport, secrets);
        Self {
            auth: AuthSessionService::new(client.clone()),
            users: UserService::new(client),
        }
    }
}
