use std::sync::Arc;

use tracing::info;

use crate::entities::NOT_AVAILABLE;
use crate::error::Error;
use crate::ports::AdminApi;

/// Outcome of a successful connectivity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionReport {
    pub environment_count: usize,
    /// Display name of the first environment (`N/A` when it has none).
    /// `None` when the tenant has no environments.
    pub sample_environment: Option<String>,
}

/// Lists environments once to prove the token and API base work.
/// Unlike the audit, failures propagate to the caller.
pub struct TestConnectionUseCase<A>
where
    A: AdminApi,
{
    api: Arc<A>,
}

impl<A> TestConnectionUseCase<A>
where
    A: AdminApi,
{
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn execute(&self) -> Result<ConnectionReport, Error> {
        let environments = self.api.list_environments().await?;

        let sample_environment = environments.first().map(|env| {
            env.properties
                .display_name
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        });

        info!(count = environments.len(), "connection test succeeded");

        Ok(ConnectionReport {
            environment_count: environments.len(),
            sample_environment,
        })
    }
}
