//! Wire DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! The backend is an external PHP service, so these types are lenient where
//! it is loose (ids arrive as numbers or strings, provider types as free
//! text) and strict where access decisions depend on the value (`role`).

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Account role as reported by the backend, plus `Admin` for admin sessions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    ServiceProvider,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::ServiceProvider => "service_provider",
            Self::Admin => "admin",
        }
    }
}

/// Service-provider specialisation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderType {
    LocalGuide,
    EquipmentRenter,
}

impl ProviderType {
    /// Parse the backend's display string. Unknown values yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Local Guide" => Some(Self::LocalGuide),
            "Equipment Renter" => Some(Self::EquipmentRenter),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LocalGuide => "Local Guide",
            Self::EquipmentRenter => "Equipment Renter",
        }
    }
}

/// Which login surface a session came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    User,
    Admin,
}

/// Customer or service-provider identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Backend id when reported. Access decisions never depend on it.
    #[serde(default, deserialize_with = "deserialize_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    /// Raw provider type string; see [`UserRecord::provider_kind`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
}

impl UserRecord {
    /// Parsed provider type, when the user is a provider and the value is known.
    #[must_use]
    pub fn provider_kind(&self) -> Option<ProviderType> {
        if self.role != Role::ServiceProvider {
            return None;
        }
        self.provider_type.as_deref().and_then(ProviderType::parse)
    }
}

/// Back-office administrator identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRecord {
    /// Backend id when reported. Access decisions never depend on it.
    #[serde(default, deserialize_with = "deserialize_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Response body of both whoami endpoints.
///
/// `user` is kept as raw JSON because the admin endpoint returns an
/// admin-shaped record under the same key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityResponse {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

/// Travel Buddy feature flag for the current user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureStatus {
    #[serde(default)]
    pub enabled: bool,
}

/// Credentials posted by the user and admin login forms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// New account posted by the registration form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
}

/// Generic `{ success, message }` envelope used by form endpoints.
///
/// Login endpoints add the identity under `user`; the OTP step adds `token`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

/// Ids arrive as strings, numbers, `null`, or not at all.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s).filter(|s| !s.is_empty())),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(D::Error::custom("expected string or number id")),
    }
}
