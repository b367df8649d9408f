mod audit_public_apps;
mod test_connection;

#[cfg(test)]
pub(crate) mod fake_api;

pub use audit_public_apps::{first_public_permission, PublicAppsAuditUseCase};
pub use test_connection::{ConnectionReport, TestConnectionUseCase};
