use async_trait::async_trait;
use ppaudit_core::entities::AccessToken;
use ppaudit_core::ports::HttpTransport;
use ppaudit_core::Error;
use reqwest::{header, Client, Response};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::network::build_api_client;

/// Longest slice of an error body kept in error messages.
const MAX_ERROR_BODY: usize = 512;

/// [`HttpTransport`] backed by a shared reqwest client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, Error> {
        Ok(Self::with_client(build_api_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn decode(url: &str, response: Response) -> Result<Value, Error> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Network(format!(
                "{} returned {}{}",
                url,
                status,
                error_body_suffix(&body)
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("failed to read response from {}: {}", url, e)))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Protocol(format!("invalid JSON from {}: {}", url, e)))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, token))]
    async fn get_json(&self, url: &str, token: &AccessToken) -> Result<Value, Error> {
        debug!("GET");

        let response = self
            .client
            .get(url)
            .bearer_auth(token.secret())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::Network(format!("GET {} failed: {}", url, e)))?;

        Self::decode(url, response).await
    }

    #[instrument(skip(self, form))]
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Value, Error> {
        debug!("POST");

        let response = self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .form(form)
            .send()
            .await
            .map_err(|e| Error::Network(format!("POST {} failed: {}", url, e)))?;

        Self::decode(url, response).await
    }
}

fn error_body_suffix(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }

    let cut = body
        .char_indices()
        .nth(MAX_ERROR_BODY)
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    format!(": {}", &body[..cut])
}
