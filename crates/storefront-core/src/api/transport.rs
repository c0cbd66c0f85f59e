//! HTTP transport seam.
//!
//! The authenticated client builds a `RequestEnvelope`, decorates it, and
//! hands it to a `Transport`. Production uses `ReqwestTransport`; tests
//! substitute a recording fake.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::debug;

use super::ApiError;

/// A single outgoing request, before it is sent
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestEnvelope {
    pub fn new(method: Method, path: &str, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: HeaderMap::new(),
            body,
        }
    }

    /// Value of the Authorization header, if set
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// Status and raw body of a received response, whatever the status
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the envelope. Only failures to get any response are errors.
    async fn send(&self, envelope: RequestEnvelope) -> Result<TransportResponse, ApiError>;
}

/// Transport over reqwest with a fixed base address and timeout.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Join base and path with exactly one slash, keeping any trailing slash on the path
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, envelope: RequestEnvelope) -> Result<TransportResponse, ApiError> {
        let url = self.url_for(&envelope.path);
        debug!(method = %envelope.method, url = %url, "Sending request");

        let mut request = self
            .client
            .request(envelope.method, &url)
            .headers(envelope.headers);
        if let Some(ref body) = envelope.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response body: {}", e)))?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_with_single_slash() {
        let transport =
            ReqwestTransport::new("http://10.0.2.2:3000/", Duration::from_secs(10)).unwrap();
        assert_eq!(transport.url_for("/users"), "http://10.0.2.2:3000/users");
        assert_eq!(transport.url_for("auth/login"), "http://10.0.2.2:3000/auth/login");
        assert_eq!(
            transport.url_for("/users/address/"),
            "http://10.0.2.2:3000/users/address/"
        );

        let bare = ReqwestTransport::new("http://localhost:3000", Duration::from_secs(10)).unwrap();
        assert_eq!(bare.url_for("/user/getUser"), "http://localhost:3000/user/getUser");
    }

    #[test]
    fn test_envelope_authorization() {
        let mut envelope = RequestEnvelope::new(Method::GET, "/user/getUser", None);
        assert_eq!(envelope.authorization(), None);
        envelope
            .headers
            .insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok123"));
        assert_eq!(envelope.authorization(), Some("Bearer tok123"));
    }

    #[test]
    fn test_response_success_range() {
        let ok = TransportResponse { status: 201, body: String::new() };
        let redirect = TransportResponse { status: 302, body: String::new() };
        let denied = TransportResponse { status: 401, body: String::new() };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
        assert!(!denied.is_success());
    }
}
