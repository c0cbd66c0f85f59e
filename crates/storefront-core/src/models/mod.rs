//! Wire models for the storefront backend.
//!
//! This module contains the request and response bodies exchanged with the
//! backend's REST surface:
//!
//! - `Address`, `AddressRequest`, `AddressUpdate`: shipping/billing addresses
//! - `UserData`, `UserUpdate`: the signed-in user's profile
//! - `RegisterRequest`, `RegisterResponse`: account creation
//! - `LoginRequest`, `LoginResponse`: credential exchange for a token

pub mod address;
pub mod auth;
pub mod user;

pub use address::{Address, AddressRequest, AddressType, AddressUpdate};
pub use auth::{
    DatabaseResult, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    RegistrationData, StripeResult,
};
pub use user::{UserData, UserUpdate};

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Accept ids sent either as JSON strings or numbers
pub(crate) fn id_as_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!("invalid id: {}", other))),
    }
}
