//! REST API client module for the storefront backend.
//!
//! This module provides the `AuthenticatedHttpClient`, which sends requests
//! through a `Transport` and attaches the stored bearer token, and the
//! `UserService` for profile and address calls.

pub mod client;
pub mod error;
pub mod transport;
pub mod users;

#[cfg(test)]
pub(crate) mod fake;

pub use client::AuthenticatedHttpClient;
pub use error::ApiError;
pub use transport::{ReqwestTransport, RequestEnvelope, Transport, TransportResponse};
pub use users::UserService;
