use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Connection details for the administrative backend.
///
/// Without a `url` every admin call is rejected before any network I/O.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct AdminApiConfig {
    pub url: Option<String>,
    /// Sent verbatim in the `Authorization` header.
    pub token: Option<String>,
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

fn default_timeout_in_ms() -> u64 {
    10_000
}

impl Default for AdminApiConfig {
    fn default() -> Self {
        AdminApiConfig {
            url: None,
            token: None,
            timeout_in_ms: default_timeout_in_ms(),
        }
    }
}
