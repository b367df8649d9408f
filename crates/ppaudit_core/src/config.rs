use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_API_BASE_URL: &str =
    "https://api.powerplatform.com/providers/Microsoft.PowerApps/";
pub const DEFAULT_API_VERSION: &str = "2020-10-12";
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
pub const DEFAULT_SCOPE: &str = "https://api.powerplatform.com/.default";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub credentials: CredentialSettings,
    pub log_level: String,
}

/// Admin API endpoint settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiSettings {
    /// Base URL, including the trailing slash. Paths are appended verbatim.
    pub base_url: String,
    /// Pinned `api-version` query parameter sent with every call.
    pub version: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthSettings {
    pub authority_host: String,
    pub scope: String,
}

impl AuthSettings {
    /// OAuth2 v2.0 token endpoint for a tenant.
    pub fn token_url(&self, tenant_id: &str) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_host.trim_end_matches('/'),
            tenant_id
        )
    }
}

/// Raw credential values as loaded. Any of them may be missing until
/// [`TenantCredentials::from_settings`] checks them.
#[derive(Deserialize, Serialize, Clone, Default)]
pub struct CredentialSettings {
    pub tenant_id: Option<String>,
    pub client_id: Option<String>,
    #[serde(skip_serializing)]
    pub client_secret: Option<String>,
}

impl fmt::Debug for CredentialSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSettings")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Validated client-credentials triple.
#[derive(Clone, PartialEq, Eq)]
pub struct TenantCredentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl TenantCredentials {
    pub fn new(tenant_id: String, client_id: String, client_secret: String) -> Self {
        Self {
            tenant_id,
            client_id,
            client_secret,
        }
    }

    /// Fails with [`Error::Configuration`] naming every absent value.
    /// Blank strings count as absent. Present values are kept verbatim.
    pub fn from_settings(settings: &CredentialSettings) -> Result<Self, Error> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.trim().is_empty())
        }

        let tenant_id = present(&settings.tenant_id);
        let client_id = present(&settings.client_id);
        let client_secret = present(&settings.client_secret);

        match (tenant_id, client_id, client_secret) {
            (Some(tenant_id), Some(client_id), Some(client_secret)) => Ok(Self::new(
                tenant_id.to_string(),
                client_id.to_string(),
                client_secret.to_string(),
            )),
            _ => {
                let missing: Vec<&str> = [
                    ("TENANT_ID", tenant_id),
                    ("CLIENT_ID", client_id),
                    ("CLIENT_SECRET", client_secret),
                ]
                .iter()
                .filter(|(_, value)| value.is_none())
                .map(|(name, _)| *name)
                .collect();

                Err(Error::Configuration(format!(
                    "missing authentication credentials: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

impl fmt::Debug for TenantCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantCredentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            auth: AuthSettings::default(),
            credentials: CredentialSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }
}
