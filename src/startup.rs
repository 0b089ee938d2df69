//! Builds the application services from a configuration.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::admin::{create_admin_api, AdminApiError};
use crate::config::ConfigV1;
use crate::handshake::HandshakeTokenManager;
use crate::preferences::{DefaultValidator, PreferenceStore};
use crate::state::AppState;
use crate::store::{create_store, StoreError};

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    AdminApi(#[from] AdminApiError),
}

/// Opens the substrate and wires the preference store, the handshake tokens
/// and the admin client on top of it.
///
/// # Errors
///
/// Returns an error if the configured store cannot be opened or the admin
/// backoffice URL is unusable.
pub fn build_state(config: Arc<ConfigV1>) -> Result<AppState, StartupError> {
    let store = create_store(&config.store)?;
    let validator = Arc::new(DefaultValidator::new(&config.validation));
    let preferences = Arc::new(PreferenceStore::new(store.clone(), validator));
    let handshake = Arc::new(HandshakeTokenManager::new(store.clone()));
    let admin = create_admin_api(&config.admin_api)?;

    info!(
        store_enabled = store.is_enabled(),
        admin_configured = admin.is_configured(),
        "playerstore services ready"
    );

    Ok(AppState {
        config,
        store,
        preferences,
        handshake,
        admin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_state() {
        let state = build_state(Arc::new(ConfigV1::default())).unwrap();
        assert!(state.store.is_enabled());
        assert!(!state.admin.is_configured());
    }

    #[test]
    fn test_preferences_and_tokens_share_the_store() {
        let state = build_state(Arc::new(ConfigV1::default())).unwrap();
        state.preferences.set_fullscreen(true).unwrap();
        let nonce = state.handshake.generate_nonce().unwrap();

        assert_eq!(state.store.get("fullscreen").as_deref(), Some("true"));
        assert_eq!(state.store.get("nonce"), Some(nonce));
    }
}
