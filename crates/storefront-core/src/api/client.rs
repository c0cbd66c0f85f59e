//! HTTP client that attaches the stored session token to every request.

use std::sync::Arc;

use reqwest::header::{self, HeaderValue};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::auth::SecretStore;

use super::transport::{RequestEnvelope, Transport};
use super::ApiError;

/// API client for the storefront backend.
/// Clone is cheap - the transport and secret store are shared.
#[derive(Clone)]
pub struct AuthenticatedHttpClient {
    transport: Arc<dyn Transport>,
    secrets: Arc<dyn SecretStore>,
}

impl AuthenticatedHttpClient {
    pub fn new(transport: Arc<dyn Transport>, secrets: Arc<dyn SecretStore>) -> Self {
        Self { transport, secrets }
    }

    /// The store the bearer token is read from
    pub fn secrets(&self) -> &Arc<dyn SecretStore> {
        &self.secrets
    }

    /// Attach `Authorization: Bearer <token>` when a token is stored.
    ///
    /// A store that cannot be read leaves the request unauthenticated
    /// instead of failing it; public endpoints must keep working.
    async fn authorize(&self, envelope: &mut RequestEnvelope) {
        let token = match self.secrets.get().await {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return,
            Err(e) => {
                warn!(error = %e, "Could not read session token, continuing without it");
                return;
            }
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => {
                envelope.headers.insert(header::AUTHORIZATION, value);
            }
            Err(_) => warn!("Stored session token is not a valid header value, continuing without it"),
        }
    }

    /// Send a request and parse the body of any 2xx response.
    /// Every failure is returned as-is; nothing is retried.
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;

        let mut envelope = RequestEnvelope::new(method, path, body);
        self.authorize(&mut envelope).await;

        let method = envelope.method.clone();
        let response = self.transport.send(envelope).await?;
        debug!(%method, path, status = response.status, "Response received");

        if !response.is_success() {
            return Err(ApiError::from_status(response.status, &response.body));
        }

        let text = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", path, e))
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeTransport;
    use crate::auth::MemorySecretStore;
    use serde_json::{json, Value};

    fn client_with(transport: &FakeTransport, store: &MemorySecretStore) -> AuthenticatedHttpClient {
        AuthenticatedHttpClient::new(Arc::new(transport.clone()), Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn test_attaches_bearer_token_when_stored() {
        let transport = FakeTransport::new();
        transport.respond(200, r#"{"ok":true}"#);
        let store = MemorySecretStore::with_token("tok123");
        let client = client_with(&transport, &store);

        let body: Value = client.get("/user/getUser").await.unwrap();
        assert_eq!(body, json!({"ok": true}));

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(sent.path, "/user/getUser");
        assert_eq!(sent.authorization(), Some("Bearer tok123"));
    }

    #[tokio::test]
    async fn test_no_header_without_token() {
        let transport = FakeTransport::new();
        transport.respond(200, "{}");
        let store = MemorySecretStore::new();
        let client = client_with(&transport, &store);

        let _: Value = client.get("/user/getUser").await.unwrap();
        assert_eq!(transport.last_request().unwrap().authorization(), None);
    }

    #[tokio::test]
    async fn test_store_read_failure_still_sends_request() {
        let transport = FakeTransport::new();
        transport.respond(200, "{}");
        let store = MemorySecretStore::with_token("tok123");
        store.fail_get(true);
        let client = client_with(&transport, &store);

        let result: Result<Value, _> = client.post("/users", &json!({"name": "Ana"})).await;
        assert!(result.is_ok());

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.authorization(), None);
        assert_eq!(sent.body, Some(json!({"name": "Ana"})));
    }

    #[tokio::test]
    async fn test_empty_token_is_not_attached() {
        let transport = FakeTransport::new();
        transport.respond(200, "{}");
        let store = MemorySecretStore::with_token("");
        let client = client_with(&transport, &store);

        let _: Value = client.get("/user/getUser").await.unwrap();
        assert_eq!(transport.last_request().unwrap().authorization(), None);
    }

    #[tokio::test]
    async fn test_non_success_status_propagates_body() {
        let transport = FakeTransport::new();
        transport.respond(409, r#"{"message":"Email already registered"}"#);
        let client = client_with(&transport, &MemorySecretStore::new());

        let err = client.post::<Value, _>("/users", &json!({})).await.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.server_message().as_deref(), Some("Email already registered"));
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        let transport = FakeTransport::new();
        transport.fail_network("connection refused");
        let client = client_with(&transport, &MemorySecretStore::new());

        let err = client.get::<Value>("/user/getUser").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(ref msg) if msg == "connection refused"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_invalid_response() {
        let transport = FakeTransport::new();
        transport.respond(200, "<html>oops</html>");
        let client = client_with(&transport, &MemorySecretStore::new());

        let err = client.get::<Value>("/user/getUser").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_empty_success_body_parses_as_null() {
        let transport = FakeTransport::new();
        transport.respond(204, "");
        let client = client_with(&transport, &MemorySecretStore::new());

        let body: Option<Value> = client.put("/users/profile/1", &json!({})).await.unwrap();
        assert_eq!(body, None);
        assert_eq!(transport.last_request().unwrap().method, Method::PUT);
    }

    #[tokio::test]
    async fn test_client_never_writes_the_store() {
        let transport = FakeTransport::new();
        transport.respond(200, r#"{"access_token":"fresh"}"#);
        let store = MemorySecretStore::with_token("old");
        let client = client_with(&transport, &store);

        let _: Value = client.post("/auth/login", &json!({})).await.unwrap();
        assert_eq!(store.peek().as_deref(), Some("old"));
    }
}
