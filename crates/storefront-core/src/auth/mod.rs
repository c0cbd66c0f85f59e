//! Authentication module for managing the session token.
//!
//! This module provides:
//! - `SecretStore`: the vault holding the single session token
//! - `KeyringSecretStore`: OS-level storage via keyring
//! - `MemorySecretStore`: in-process storage for tests and ephemeral sessions
//! - `AuthSessionService`: register, login, logout and session checks
//!
//! No expiry is tracked on the client; the backend rejects stale tokens.

pub mod error;
pub mod secret_store;
pub mod service;

pub use error::{SecretStoreError, SessionError};
pub use secret_store::{KeyringSecretStore, MemorySecretStore, SecretStore};
pub use service::AuthSessionService;
