use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum AddressType {
    #[default]
    Billing,
    Shipping,
    Both,
}

/// An address as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "super::id_as_string")]
    pub id: Option<String>,
    pub address_type: AddressType,
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country_code: String,
    #[serde(default)]
    pub is_billing_default: bool,
    #[serde(default)]
    pub is_shipping_default: bool,
}

impl Address {
    /// Single-line form for display
    pub fn one_line(&self) -> String {
        format!(
            "{} {}, {}, {}, {}, {}, {}",
            self.first_name,
            self.last_name,
            self.street,
            self.city,
            self.state,
            self.postal_code,
            self.country_code
        )
    }
}

/// Body for creating an address, also embedded in registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub address_type: AddressType,
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country_code: String,
    #[serde(default)]
    pub is_billing_default: bool,
    #[serde(default)]
    pub is_shipping_default: bool,
}

impl AddressRequest {
    /// Names of required fields that are blank (street, city, postal code)
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.street.trim().is_empty() {
            missing.push("street");
        }
        if self.city.trim().is_empty() {
            missing.push("city");
        }
        if self.postal_code.trim().is_empty() {
            missing.push("postalCode");
        }
        missing
    }
}

/// Partial address update; absent fields are left unchanged by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddressUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_type: Option<AddressType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_billing_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_shipping_default: Option<bool>,
}
