use std::sync::Arc;

use async_trait::async_trait;
use ppaudit_core::config::{AuthSettings, CredentialSettings, TenantCredentials};
use ppaudit_core::entities::AccessToken;
use ppaudit_core::ports::{HttpTransport, TokenProvider};
use ppaudit_core::Error;
use serde_json::Value;
use tracing::{error, info, instrument};

const GRANT_TYPE: &str = "client_credentials";

/// OAuth2 client-credentials token provider for an Entra ID tenant.
///
/// Credentials are checked before any request is made; a missing value is a
/// configuration error, not a network one.
pub struct ClientCredentialsTokenProvider<T>
where
    T: HttpTransport,
{
    credentials: CredentialSettings,
    auth: AuthSettings,
    transport: Arc<T>,
}

impl<T> ClientCredentialsTokenProvider<T>
where
    T: HttpTransport,
{
    pub fn new(credentials: CredentialSettings, auth: AuthSettings, transport: Arc<T>) -> Self {
        Self {
            credentials,
            auth,
            transport,
        }
    }

    async fn request_token(&self, credentials: &TenantCredentials) -> Result<AccessToken, Error> {
        let url = self.auth.token_url(&credentials.tenant_id);
        let form = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("scope", self.auth.scope.as_str()),
            ("grant_type", GRANT_TYPE),
        ];

        let body = self.transport.post_form(&url, &form).await?;
        extract_access_token(&body)
    }
}

#[async_trait]
impl<T> TokenProvider for ClientCredentialsTokenProvider<T>
where
    T: HttpTransport,
{
    #[instrument(skip(self))]
    async fn fetch_token(&self) -> Result<AccessToken, Error> {
        let credentials = TenantCredentials::from_settings(&self.credentials).map_err(|e| {
            error!(error = %e, "authentication credentials are not set");
            e
        })?;

        info!(tenant_id = %credentials.tenant_id, "attempting to get access token");

        match self.request_token(&credentials).await {
            Ok(token) => {
                info!("successfully obtained access token");
                Ok(token)
            }
            Err(e) => {
                error!(error = %e, "error obtaining access token");
                Err(e)
            }
        }
    }
}

/// Pull `access_token` out of a token endpoint response.
fn extract_access_token(body: &Value) -> Result<AccessToken, Error> {
    body.get("access_token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(AccessToken::new)
        .ok_or_else(|| Error::Protocol("access token not found in response".to_string()))
}
