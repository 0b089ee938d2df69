#![allow(dead_code)]

use std::sync::Arc;

use figment::providers::{Format, Yaml};
use figment::Figment;
use playerstore::config::{from_figment, ConfigV1};
use playerstore::startup::build_state;
use playerstore::state::AppState;

pub fn config_from_yaml(yaml: &str) -> ConfigV1 {
    from_figment(Figment::new().merge(Yaml::string(yaml)))
        .expect("Failed to parse integration test config")
}

pub fn memory_config() -> ConfigV1 {
    config_from_yaml(
        r#"
version: "1.0.0"
logging:
  level: "warn"
  format: "json"
store:
  enabled: true
  type: "memory"
"#,
    )
}

pub fn file_config(path: &str) -> ConfigV1 {
    config_from_yaml(&format!(
        r#"
version: "1.0.0"
store:
  enabled: true
  type: "file"
  path: "{path}"
"#
    ))
}

pub fn admin_config(url: &str, token: &str) -> ConfigV1 {
    config_from_yaml(&format!(
        r#"
version: "1.0.0"
store:
  enabled: false
admin_api:
  url: "{url}"
  token: "{token}"
  timeout_in_ms: 2000
"#
    ))
}

pub fn build(config: ConfigV1) -> AppState {
    build_state(Arc::new(config)).expect("failed to build state")
}
