use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tunables for the default preference validator.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ValidationConfig {
    #[serde(default = "default_max_username_length")]
    pub max_username_length: usize,
}

fn default_max_username_length() -> usize {
    8
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            max_username_length: default_max_username_length(),
        }
    }
}
