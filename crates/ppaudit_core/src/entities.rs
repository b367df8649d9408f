use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classification recorded on every finding.
pub const PUBLIC_PERMISSION_TYPE: &str = "Public";

/// Fallback for owner and principal values the API leaves out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Bearer token for the admin API. Fetched once per run, never refreshed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Power Platform environment as returned by the `environments` endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Environment {
    pub name: String,
    #[serde(default)]
    pub properties: EnvironmentProperties,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentProperties {
    pub display_name: Option<String>,
}

impl Environment {
    pub fn id(&self) -> &str {
        &self.name
    }

    /// Display name, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        self.properties.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Canvas app scoped to one environment.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PowerApp {
    pub name: String,
    #[serde(default)]
    pub properties: PowerAppProperties,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PowerAppProperties {
    pub display_name: Option<String>,
    pub owner: Option<AppOwner>,
}

/// The admin API reports owners either as a bare string or as a principal
/// object. Any other shape is kept but has no label.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AppOwner {
    Name(String),
    Principal(OwnerPrincipal),
    Other(Value),
}

impl AppOwner {
    pub fn label(&self) -> Option<&str> {
        match self {
            AppOwner::Name(name) => Some(name.as_str()).filter(|n| !n.is_empty()),
            AppOwner::Principal(principal) => principal.label(),
            AppOwner::Other(_) => None,
        }
    }
}

/// Owner object. Fields are untyped so an unexpected value never rejects the app.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OwnerPrincipal {
    pub id: Option<Value>,
    pub display_name: Option<Value>,
    pub email: Option<Value>,
}

impl OwnerPrincipal {
    fn label(&self) -> Option<&str> {
        [&self.display_name, &self.email, &self.id]
            .into_iter()
            .filter_map(|v| v.as_ref().and_then(Value::as_str))
            .find(|v| !v.is_empty())
    }
}

impl PowerApp {
    pub fn id(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        self.properties.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Owner label, or `N/A` when the API omits it.
    pub fn owner(&self) -> &str {
        self.properties
            .owner
            .as_ref()
            .and_then(AppOwner::label)
            .unwrap_or(NOT_AVAILABLE)
    }
}

/// Sharing entry on an app. Only the principal's type and display name are
/// modelled; everything else in the entry is ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Permission {
    #[serde(default)]
    pub properties: PermissionProperties,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PermissionProperties {
    #[serde(default)]
    pub principal: Principal,
}

/// Identity an access-control entry is bound to.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    #[serde(rename = "type")]
    pub principal_type: Option<String>,
    pub display_name: Option<String>,
}

impl Permission {
    pub fn principal_type(&self) -> Option<&str> {
        self.properties.principal.principal_type.as_deref()
    }

    pub fn principal_display_name(&self) -> Option<&str> {
        self.properties.principal.display_name.as_deref()
    }

    /// Public-access heuristic: principal type is exactly `Public`, or the
    /// principal display name mentions "everyone" in any casing.
    pub fn is_public(&self) -> bool {
        if self.principal_type() == Some(PUBLIC_PERMISSION_TYPE) {
            return true;
        }

        self.principal_display_name()
            .filter(|name| !name.is_empty())
            .is_some_and(|name| name.to_lowercase().contains("everyone"))
    }
}

/// One publicly shared app. At most one per (environment, app) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub environment_id: String,
    pub environment_display_name: String,
    pub app_id: String,
    pub app_display_name: String,
    pub app_owner: String,
    pub permission_type: String,
    pub principal_display_name: Option<String>,
}

impl Finding {
    pub fn new(environment: &Environment, app: &PowerApp, permission: &Permission) -> Self {
        Self {
            environment_id: environment.id().to_string(),
            environment_display_name: environment.display_name().to_string(),
            app_id: app.id().to_string(),
            app_display_name: app.display_name().to_string(),
            app_owner: app.owner().to_string(),
            permission_type: PUBLIC_PERMISSION_TYPE.to_string(),
            principal_display_name: permission.principal_display_name().map(String::from),
        }
    }
}
