//! Shared HTTP client configuration for admin API and token requests.

use ppaudit_core::Error;
use reqwest::Client;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("ppaudit/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used for both the token endpoint and the admin API.
///
/// No request timeout is set; calls wait on the transport defaults.
pub fn build_api_client() -> Result<Client, Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::Network(format!("failed to create HTTP client: {}", e)))
}
