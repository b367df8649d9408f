use async_trait::async_trait;
use serde_json::Value;

use crate::entities::{AccessToken, Environment, Permission, PowerApp};
use crate::error::Error;

// ============================================================================
// Transport Ports
// ============================================================================

/// Minimal JSON-over-HTTP capability. Everything that talks to the network
/// goes through this trait.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// `GET` with a bearer token, decoding the body as JSON.
    async fn get_json(&self, url: &str, token: &AccessToken) -> Result<Value, Error>;

    /// `POST` an `application/x-www-form-urlencoded` body, decoding the reply as JSON.
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Value, Error>;
}

// ============================================================================
// Authentication Ports
// ============================================================================

#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Obtain a bearer token for the admin API.
    async fn fetch_token(&self) -> Result<AccessToken, Error>;
}

// ============================================================================
// Admin API Ports
// ============================================================================

/// Read-only view of the Power Platform admin API.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// List every environment visible to the caller
    async fn list_environments(&self) -> Result<Vec<Environment>, Error>;

    /// List apps in one environment
    async fn list_apps(&self, environment_id: &str) -> Result<Vec<PowerApp>, Error>;

    /// List the sharing entries of one app
    async fn list_permissions(
        &self,
        environment_id: &str,
        app_id: &str,
    ) -> Result<Vec<Permission>, Error>;
}
