use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use ppaudit_core::config::{
    Settings, DEFAULT_API_BASE_URL, DEFAULT_API_VERSION, DEFAULT_AUTHORITY_HOST, DEFAULT_SCOPE,
};

/// Bare credential variables and the settings keys they fill.
const CREDENTIAL_VARS: [(&str, &str); 3] = [
    ("TENANT_ID", "credentials.tenant_id"),
    ("CLIENT_ID", "credentials.client_id"),
    ("CLIENT_SECRET", "credentials.client_secret"),
];

pub fn get_configuration_with_paths(
    current_dir_path: Option<PathBuf>,
    system_config_dir_path: Option<PathBuf>,
) -> Result<Settings, config::ConfigError> {
    let config_directory = current_dir_path.unwrap_or_else(|| {
        std::env::current_dir()
            .map(|p| p.join("config"))
            .unwrap_or_else(|_| PathBuf::from("config"))
    });

    let system_config_dir = if let Some(path) = system_config_dir_path {
        path
    } else {
        ProjectDirs::from("com", "ppaudit", "ppaudit")
            .map(|d| d.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("config"))
    };

    let mut builder = Config::builder()
        .set_default("api.base_url", DEFAULT_API_BASE_URL)?
        .set_default("api.version", DEFAULT_API_VERSION)?
        .set_default("auth.authority_host", DEFAULT_AUTHORITY_HOST)?
        .set_default("auth.scope", DEFAULT_SCOPE)?
        .set_default("log_level", "info")?
        .add_source(File::from(system_config_dir.join("config.toml")).required(false))
        .add_source(File::from(config_directory.join("config.toml")).required(false))
        .add_source(Environment::with_prefix("PPAUDIT").separator("__"));

    // The credential triple is conventionally provided unprefixed (often via .env)
    for (var, key) in CREDENTIAL_VARS {
        builder = builder.set_override_option(key, std::env::var(var).ok())?;
    }

    builder.build()?.try_deserialize::<Settings>()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    get_configuration_with_paths(None, None)
}
