//! Shared application state.
//!
//! Holds the services built from one configuration. The preference store and
//! the handshake tokens share the substrate but never call each other.

use std::sync::Arc;

use crate::admin::AdminApi;
use crate::config::ConfigV1;
use crate::handshake::HandshakeTokenManager;
use crate::preferences::PreferenceStore;
use crate::store::KeyValueStore;

#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// The key-value substrate behind both the preferences and the tokens.
    pub store: Arc<dyn KeyValueStore>,
    pub preferences: Arc<PreferenceStore>,
    pub handshake: Arc<HandshakeTokenManager>,
    /// Admin backoffice client; rejects every call when no URL is configured.
    pub admin: Arc<dyn AdminApi>,
}
