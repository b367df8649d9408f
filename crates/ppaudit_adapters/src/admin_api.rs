use std::sync::Arc;

use async_trait::async_trait;
use ppaudit_core::config::ApiSettings;
use ppaudit_core::entities::{AccessToken, Environment, Permission, PowerApp};
use ppaudit_core::ports::{AdminApi, HttpTransport};
use ppaudit_core::Error;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, instrument};

/// List responses from the admin API: `{"value": [...]}`.
#[derive(Deserialize)]
struct ValueEnvelope<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
}

/// Power Platform admin API client bound to one bearer token.
pub struct PowerPlatformAdminApi<T>
where
    T: HttpTransport,
{
    transport: Arc<T>,
    token: AccessToken,
    settings: ApiSettings,
}

impl<T> PowerPlatformAdminApi<T>
where
    T: HttpTransport,
{
    pub fn new(transport: Arc<T>, token: AccessToken, settings: ApiSettings) -> Self {
        Self {
            transport,
            token,
            settings,
        }
    }

    /// `{base}{path}?api-version={version}`
    fn url(&self, path: &str) -> String {
        format!(
            "{}{}?api-version={}",
            self.settings.base_url, path, self.settings.version
        )
    }

    /// Authenticated GET returning the decoded JSON body. Failures are logged
    /// and passed on unchanged.
    pub async fn get(&self, url: &str) -> Result<Value, Error> {
        debug!(url = %url, "calling admin API");
        self.transport
            .get_json(url, &self.token)
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "admin API call failed");
                e
            })
    }

    async fn list<D: DeserializeOwned>(&self, path: &str) -> Result<Vec<D>, Error> {
        let url = self.url(path);
        let body = self.get(&url).await?;

        let envelope: ValueEnvelope<D> = serde_json::from_value(body).map_err(|e| {
            let err = Error::Protocol(format!("unexpected response shape from {}: {}", url, e));
            error!(error = %err, "admin API response rejected");
            err
        })?;

        Ok(envelope.value)
    }
}

#[async_trait]
impl<T> AdminApi for PowerPlatformAdminApi<T>
where
    T: HttpTransport,
{
    #[instrument(skip(self))]
    async fn list_environments(&self) -> Result<Vec<Environment>, Error> {
        self.list("environments").await
    }

    #[instrument(skip(self))]
    async fn list_apps(&self, environment_id: &str) -> Result<Vec<PowerApp>, Error> {
        self.list(&format!("environments/{}/apps", environment_id))
            .await
    }

    #[instrument(skip(self))]
    async fn list_permissions(
        &self,
        environment_id: &str,
        app_id: &str,
    ) -> Result<Vec<Permission>, Error> {
        self.list(&format!(
            "environments/{}/apps/{}/permissions",
            environment_id, app_id
        ))
        .await
    }
}
