//! Storefront core library.
//!
//! Client side of the storefront backend: an HTTP client that attaches the
//! stored bearer token to every request, the login/logout session service
//! built on top of it, and the profile/address calls the app screens use.

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod messages;
pub mod models;

pub use api::{ApiError, AuthenticatedHttpClient, ReqwestTransport, Transport, UserService};
pub use auth::{
    AuthSessionService, KeyringSecretStore, MemorySecretStore, SecretStore, SecretStoreError,
    SessionError,
};
pub use config::Config;
pub use context::SessionContext;
pub use messages::UserMessage;
