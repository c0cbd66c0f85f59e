use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::AddressRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub address: AddressRequest,
}

/// Backend description of a newly created account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub data: RegistrationData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationData {
    pub message: String,
    pub database: DatabaseResult,
    pub stripe: StripeResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseResult {
    pub message: String,
    pub user_id: i64,
    pub address_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeResult {
    pub message: String,
    pub stripe_customer_id: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Keep the password out of logs
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl LoginRequest {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    /// Form checks run before any network call.
    /// Returns `(field, message)` pairs for every problem found.
    pub fn validate(&self) -> Result<(), Vec<(&'static str, &'static str)>> {
        let mut errors = Vec::new();

        if self.email.trim().is_empty() {
            errors.push(("email", "Email is required"));
        } else if !looks_like_email(&self.email) {
            errors.push(("email", "Email is not valid"));
        }

        if self.password.trim().is_empty() {
            errors.push(("password", "Password is required"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// True if some whitespace-free run has the shape `x@y.z`
fn looks_like_email(s: &str) -> bool {
    s.split_whitespace().any(|word| {
        let at = word.char_indices().find(|&(i, c)| c == '@' && i > 0).map(|(i, _)| i);
        let dot = word
            .char_indices()
            .filter(|&(i, c)| c == '.' && i + 1 < word.len())
            .map(|(i, _)| i)
            .last();
        matches!((at, dot), (Some(a), Some(d)) if d >= a + 2)
    })
}

/// Result of a login call.
///
/// Only `access_token` is interpreted; any user or profile fields the
/// backend attaches are kept in `extra`.
#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("has_token", &self.token().is_some())
            .field("extra", &self.extra)
            .finish()
    }
}

impl LoginResponse {
    /// The issued token, if present and non-empty
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }
}
