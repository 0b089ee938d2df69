use crate::config::ValidationConfig;

/// Format predicates applied when reading the name and layer preferences.
pub trait PreferenceValidator: Send + Sync {
    fn is_user_name_valid(&self, name: &str) -> bool;
    fn are_character_layers_valid(&self, layers: &[String]) -> bool;
}

/// Names are non-empty, space-free and bounded in length; layers are a
/// non-empty list of word identifiers (`[A-Za-z0-9_]+`).
#[derive(Debug, Clone)]
pub struct DefaultValidator {
    max_username_length: usize,
}

impl DefaultValidator {
    pub fn new(config: &ValidationConfig) -> Self {
        DefaultValidator {
            max_username_length: config.max_username_length,
        }
    }
}

impl Default for DefaultValidator {
    fn default() -> Self {
        Self::new(&ValidationConfig::default())
    }
}

impl PreferenceValidator for DefaultValidator {
    fn is_user_name_valid(&self, name: &str) -> bool {
        let length = name.chars().count();
        length > 0 && length <= self.max_username_length && !name.contains(' ')
    }

    fn are_character_layers_valid(&self, layers: &[String]) -> bool {
        !layers.is_empty()
            && layers.iter().all(|layer| {
                !layer.is_empty() && layer.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            })
    }
}
