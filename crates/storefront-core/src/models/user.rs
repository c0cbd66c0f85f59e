use serde::{Deserialize, Serialize};

use super::Address;

/// The signed-in user's profile, including every saved address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default, deserialize_with = "super::id_as_string")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: Vec<Address>,
}

impl UserData {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name).trim().to_string()
    }
}

/// Partial profile update; absent fields are left unchanged by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
