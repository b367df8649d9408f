use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::entities::{Finding, Permission};
use crate::error::Error;
use crate::ports::AdminApi;

/// Walks environments, then apps, then permissions, and reports every app
/// shared publicly.
///
/// The audit is all-or-nothing: any failure along the way is logged and
/// turned into an empty result, never a partial one.
pub struct PublicAppsAuditUseCase<A>
where
    A: AdminApi,
{
    api: Arc<A>,
}

impl<A> PublicAppsAuditUseCase<A>
where
    A: AdminApi,
{
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Run the audit. Findings keep API order: environment, then app.
    pub async fn execute(&self) -> Vec<Finding> {
        info!("starting audit for publicly shared apps");

        match self.collect_findings().await {
            Ok(findings) => {
                info!(
                    count = findings.len(),
                    "finished audit for publicly shared apps"
                );
                findings
            }
            Err(e) => {
                error!(error = %e, "public app audit failed");
                Vec::new()
            }
        }
    }

    async fn collect_findings(&self) -> Result<Vec<Finding>, Error> {
        let mut findings = Vec::new();

        let environments = self.api.list_environments().await?;
        info!(count = environments.len(), "found environments");

        for env in &environments {
            debug!(
                environment = env.display_name(),
                environment_id = env.id(),
                "checking environment"
            );

            let apps = self.api.list_apps(env.id()).await?;
            debug!(
                count = apps.len(),
                environment = env.display_name(),
                "found apps"
            );

            for app in &apps {
                let permissions = self.api.list_permissions(env.id(), app.id()).await?;

                if let Some(permission) = first_public_permission(&permissions) {
                    warn!(
                        app = app.display_name(),
                        environment = env.display_name(),
                        "public app found"
                    );
                    findings.push(Finding::new(env, app, permission));
                }
            }
        }

        Ok(findings)
    }
}

/// First permission, in API order, that grants public access.
pub fn first_public_permission(permissions: &[Permission]) -> Option<&Permission> {
    permissions.iter().find(|p| p.is_public())
}
