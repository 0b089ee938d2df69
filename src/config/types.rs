use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::admin::AdminApiConfig;
use super::logging::LoggingConfig;
use super::store::StoreConfig;
use super::validation::ValidationConfig;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0, containing logging, store, admin backend and validation.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub admin_api: AdminApiConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Layers the YAML file at `path`, then `PLAYERSTORE_*` variables, then the legacy
/// `ADMIN_API_URL` / `ADMIN_API_TOKEN` variables.
pub fn figment(path: &str) -> Figment {
    Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed("PLAYERSTORE_").split("__"))
        .merge(
            Env::raw()
                .only(&["ADMIN_API_URL", "ADMIN_API_TOKEN"])
                .map(|key| {
                    key.as_str()
                        .to_ascii_lowercase()
                        .replacen("admin_api_", "admin_api.", 1)
                        .into()
                }),
        )
}

/// Extract a `ConfigV1` from an already assembled figment.
pub fn from_figment(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// Load config from the YAML file at `path`, with environment overrides.
pub fn load_config(path: &str) -> Result<ConfigV1, figment::Error> {
    from_figment(figment(path))
}

/// Render the JSON schema for the configuration.
pub fn config_schema() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}
