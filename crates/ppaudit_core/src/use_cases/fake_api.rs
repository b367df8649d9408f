//! In-memory [`AdminApi`] for use case tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::entities::{Environment, Permission, PowerApp};
use crate::error::Error;
use crate::ports::AdminApi;

#[derive(Default)]
pub(crate) struct FakeAdminApi {
    environments: Vec<Environment>,
    apps: HashMap<String, Vec<PowerApp>>,
    permissions: HashMap<(String, String), Vec<Permission>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeAdminApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(mut self, id: &str, display_name: Option<&str>) -> Self {
        let env = match display_name {
            Some(name) => json!({ "name": id, "properties": { "displayName": name } }),
            None => json!({ "name": id }),
        };
        self.environments
            .push(serde_json::from_value(env).expect("valid environment"));
        self
    }

    pub fn with_app(mut self, env_id: &str, app_id: &str, display_name: &str) -> Self {
        let app = json!({
            "name": app_id,
            "properties": { "displayName": display_name, "owner": "Jane Doe" }
        });
        self.apps
            .entry(env_id.to_string())
            .or_default()
            .push(serde_json::from_value(app).expect("valid app"));
        self
    }

    pub fn with_permission(
        mut self,
        env_id: &str,
        app_id: &str,
        principal_type: &str,
        display_name: &str,
    ) -> Self {
        let perm = json!({
            "properties": {
                "principal": { "type": principal_type, "displayName": display_name }
            }
        });
        self.with_raw_permission(env_id, app_id, perm)
    }

    /// Add a permission decoded from an arbitrary API payload.
    pub fn with_raw_permission(mut self, env_id: &str, app_id: &str, perm: Value) -> Self {
        self.permissions
            .entry((env_id.to_string(), app_id.to_string()))
            .or_default()
            .push(serde_json::from_value(perm).expect("valid permission"));
        self
    }

    /// Make the call recorded under `call` fail with a network error.
    pub fn failing(mut self, call: &str) -> Self {
        self.failing.insert(call.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) -> Result<(), Error> {
        self.calls.lock().expect("calls lock").push(call.clone());
        if self.failing.contains(&call) {
            return Err(Error::Network(format!("{} failed", call)));
        }
        Ok(())
    }
}

#[async_trait]
impl AdminApi for FakeAdminApi {
    async fn list_environments(&self) -> Result<Vec<Environment>, Error> {
        self.record("environments".to_string())?;
        Ok(self.environments.clone())
    }

    async fn list_apps(&self, environment_id: &str) -> Result<Vec<PowerApp>, Error> {
        self.record(format!("apps:{}", environment_id))?;
        Ok(self.apps.get(environment_id).cloned().unwrap_or_default())
    }

    async fn list_permissions(
        &self,
        environment_id: &str,
        app_id: &str,
    ) -> Result<Vec<Permission>, Error> {
        self.record(format!("permissions:{}/{}", environment_id, app_id))?;
        Ok(self
            .permissions
            .get(&(environment_id.to_string(), app_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
