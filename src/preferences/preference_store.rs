use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::codec::{
    decode_flag, decode_float, decode_int, decode_json, decode_json_string, encode_json,
};
use super::validator::PreferenceValidator;
use crate::models::{CustomCursorPosition, LocalUser, PreferenceSnapshot};
use crate::store::{keys, KeyValueStore, StoreError};
use crate::utils::log_throttle::LogThrottle;

pub const DEFAULT_GAME_QUALITY: u32 = 60;
pub const DEFAULT_VIDEO_QUALITY: u32 = 20;
pub const DEFAULT_AUDIO_VOLUME: f64 = 1.0;

const DECODE_FAILURE_LOG_WINDOW: Duration = Duration::from_secs(60);

/// Typed, validating access to the player's persisted preferences.
///
/// Getters never fail: absent, malformed or invalid stored data reads as the
/// documented default (or `None`). Setters write without validating and only
/// fail when the substrate itself cannot persist the write.
pub struct PreferenceStore {
    store: Arc<dyn KeyValueStore>,
    validator: Arc<dyn PreferenceValidator>,
    rejected_log: LogThrottle,
}

impl PreferenceStore {
    pub fn new(store: Arc<dyn KeyValueStore>, validator: Arc<dyn PreferenceValidator>) -> Self {
        PreferenceStore {
            store,
            validator,
            rejected_log: LogThrottle::new(DECODE_FAILURE_LOG_WINDOW),
        }
    }

    fn raw(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    /// Records that a stored value was present but unusable.
    fn note_rejected(&self, key: &'static str, reason: &'static str) {
        if let Some(suppressed_count) = self.rejected_log.should_emit(key) {
            debug!(
                event_name = "preferences.decode.rejected",
                event_domain = "preferences",
                key,
                reason,
                suppressed_count,
                "stored preference ignored"
            );
        }
    }

    // -- Local user

    pub fn save_user(&self, local_user: &LocalUser) -> Result<(), StoreError> {
        self.store.set(keys::LOCAL_USER, &encode_json(local_user)?)
    }

    pub fn local_user(&self) -> Option<LocalUser> {
        let raw = self.raw(keys::LOCAL_USER)?;
        let user = decode_json(Some(raw.as_str()));
        if user.is_none() {
            self.note_rejected(keys::LOCAL_USER, "malformed");
        }
        user
    }

    // -- Display name

    pub fn set_name(&self, name: &str) -> Result<(), StoreError> {
        self.store.set(keys::PLAYER_NAME, name)
    }

    pub fn name(&self) -> Option<String> {
        let value = self.raw(keys::PLAYER_NAME).unwrap_or_default();
        if self.validator.is_user_name_valid(&value) {
            Some(value)
        } else {
            if !value.is_empty() {
                self.note_rejected(keys::PLAYER_NAME, "invalid");
            }
            None
        }
    }

    // -- Selected character

    pub fn set_player_character_index(&self, index: i32) -> Result<(), StoreError> {
        self.store.set(keys::SELECTED_PLAYER, &index.to_string())
    }

    /// `None` means no character has been picked yet.
    pub fn player_character_index(&self) -> Option<i32> {
        decode_int(self.raw(keys::SELECTED_PLAYER).as_deref()).and_then(|v| i32::try_from(v).ok())
    }

    // -- Customisation cursor

    pub fn set_custom_cursor_position(
        &self,
        active_row: u32,
        selected_layers: &[u32],
    ) -> Result<(), StoreError> {
        let position = CustomCursorPosition::new(active_row, selected_layers.to_vec());
        self.store
            .set(keys::CUSTOM_CURSOR_POSITION, &encode_json(&position)?)
    }

    pub fn custom_cursor_position(&self) -> Option<CustomCursorPosition> {
        let raw = self.raw(keys::CUSTOM_CURSOR_POSITION)?;
        let position = decode_json(Some(raw.as_str()));
        if position.is_none() && raw != "null" {
            self.note_rejected(keys::CUSTOM_CURSOR_POSITION, "malformed");
        }
        position
    }

    // -- Character layers

    pub fn set_character_layers(&self, layers: &[String]) -> Result<(), StoreError> {
        self.store.set(keys::CHARACTER_LAYERS, &encode_json(layers)?)
    }

    pub fn character_layers(&self) -> Option<Vec<String>> {
        let raw = self.raw(keys::CHARACTER_LAYERS)?;
        let Some(layers) = decode_json::<Vec<String>>(Some(raw.as_str())) else {
            self.note_rejected(keys::CHARACTER_LAYERS, "malformed");
            return None;
        };
        if !self.validator.are_character_layers_valid(&layers) {
            self.note_rejected(keys::CHARACTER_LAYERS, "invalid");
            return None;
        }
        Some(layers)
    }

    // -- Companion

    /// `None` records an explicit "no companion" choice, which is still
    /// visible through `was_companion_set`.
    pub fn set_companion(&self, companion: Option<&str>) -> Result<(), StoreError> {
        self.store.set(keys::COMPANION, &encode_json(&companion)?)
    }

    pub fn companion(&self) -> Option<String> {
        decode_json_string(self.raw(keys::COMPANION).as_deref())
    }

    /// Whether the player ever made a companion choice, including "none".
    pub fn was_companion_set(&self) -> bool {
        matches!(self.raw(keys::COMPANION), Some(raw) if !raw.is_empty())
    }

    // -- Quality levels

    pub fn set_game_quality(&self, value: u32) -> Result<(), StoreError> {
        self.store.set(keys::GAME_QUALITY, &value.to_string())
    }

    /// Stored game quality, or 60. Values that are not a non-negative integer,
    /// negative ones such as `"-4"` included, read as the default.
    pub fn game_quality(&self) -> u32 {
        self.quality(keys::GAME_QUALITY, DEFAULT_GAME_QUALITY)
    }

    pub fn set_video_quality(&self, value: u32) -> Result<(), StoreError> {
        self.store.set(keys::VIDEO_QUALITY, &value.to_string())
    }

    /// Stored video quality, or 20. Negative or malformed values read as the default.
    pub fn video_quality(&self) -> u32 {
        self.quality(keys::VIDEO_QUALITY, DEFAULT_VIDEO_QUALITY)
    }

    fn quality(&self, key: &'static str, default: u32) -> u32 {
        let Some(raw) = self.raw(key).filter(|raw| !raw.is_empty()) else {
            return default;
        };
        match decode_int(Some(raw.as_str())).and_then(|v| u32::try_from(v).ok()) {
            Some(value) => value,
            None => {
                self.note_rejected(key, "malformed");
                default
            }
        }
    }

    // -- Audio

    pub fn set_audio_player_volume(&self, value: f64) -> Result<(), StoreError> {
        self.store.set(keys::AUDIO_VOLUME, &value.to_string())
    }

    pub fn audio_player_volume(&self) -> f64 {
        decode_float(self.raw(keys::AUDIO_VOLUME).as_deref()).unwrap_or(DEFAULT_AUDIO_VOLUME)
    }

    pub fn set_audio_player_muted(&self, muted: bool) -> Result<(), StoreError> {
        self.store.set(keys::AUDIO_MUTE, &muted.to_string())
    }

    pub fn audio_player_muted(&self) -> bool {
        decode_flag(self.raw(keys::AUDIO_MUTE).as_deref(), "true")
    }

    // -- Flags

    /// One-way: the camera help is never "un-shown".
    pub fn set_help_camera_settings_shown(&self) -> Result<(), StoreError> {
        self.store.set(keys::HELP_CAMERA_SETTINGS_SHOWN, "1")
    }

    pub fn help_camera_settings_shown(&self) -> bool {
        decode_flag(self.raw(keys::HELP_CAMERA_SETTINGS_SHOWN).as_deref(), "1")
    }

    pub fn set_fullscreen(&self, fullscreen: bool) -> Result<(), StoreError> {
        self.store.set(keys::FULLSCREEN, &fullscreen.to_string())
    }

    pub fn fullscreen(&self) -> bool {
        decode_flag(self.raw(keys::FULLSCREEN).as_deref(), "true")
    }

    // -- Navigation

    pub fn set_last_room_url(&self, room_url: &str) -> Result<(), StoreError> {
        self.store.set(keys::LAST_ROOM_URL, room_url)
    }

    pub fn last_room_url(&self) -> String {
        self.raw(keys::LAST_ROOM_URL).unwrap_or_default()
    }

    // -- Auth token

    /// `None` or an empty token removes the stored token.
    pub fn set_auth_token(&self, token: Option<&str>) -> Result<(), StoreError> {
        match token {
            Some(token) if !token.is_empty() => self.store.set(keys::AUTH_TOKEN, token),
            _ => self.store.remove(keys::AUTH_TOKEN),
        }
    }

    pub fn auth_token(&self) -> Option<String> {
        self.raw(keys::AUTH_TOKEN)
    }

    pub fn snapshot(&self) -> PreferenceSnapshot {
        PreferenceSnapshot {
            player_name: self.name(),
            player_character_index: self.player_character_index(),
            custom_cursor_position: self.custom_cursor_position(),
            character_layers: self.character_layers(),
            companion: self.companion(),
            companion_set: self.was_companion_set(),
            game_quality: self.game_quality(),
            video_quality: self.video_quality(),
            audio_volume: self.audio_player_volume(),
            audio_muted: self.audio_player_muted(),
            help_camera_settings_shown: self.help_camera_settings_shown(),
            fullscreen: self.fullscreen(),
            last_room_url: self.last_room_url(),
            local_user: self.local_user(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CharacterTexture;
    use crate::preferences::DefaultValidator;
    use crate::store::MemoryStore;
    use tracing_test::traced_test;

    fn setup() -> (Arc<MemoryStore>, PreferenceStore) {
        let store = Arc::new(MemoryStore::new());
        let prefs = PreferenceStore::new(store.clone(), Arc::new(DefaultValidator::default()));
        (store, prefs)
    }

    #[test]
    fn test_defaults_on_empty_store() {
        let (_, prefs) = setup();
        assert_eq!(prefs.name(), None);
        assert_eq!(prefs.player_character_index(), None);
        assert_eq!(prefs.custom_cursor_position(), None);
        assert_eq!(prefs.character_layers(), None);
        assert_eq!(prefs.companion(), None);
        assert!(!prefs.was_companion_set());
        assert_eq!(prefs.game_quality(), 60);
        assert_eq!(prefs.video_quality(), 20);
        assert_eq!(prefs.audio_player_volume(), 1.0);
        assert!(!prefs.audio_player_muted());
        assert!(!prefs.help_camera_settings_shown());
        assert!(!prefs.fullscreen());
        assert_eq!(prefs.last_room_url(), "");
        assert_eq!(prefs.auth_token(), None);
        assert_eq!(prefs.local_user(), None);
    }

    #[test]
    fn test_scalar_round_trips() {
        let (_, prefs) = setup();
        prefs.set_name("alice").unwrap();
        prefs.set_player_character_index(3).unwrap();
        prefs.set_game_quality(30).unwrap();
        prefs.set_video_quality(5).unwrap();
        prefs.set_audio_player_volume(0.35).unwrap();
        prefs.set_audio_player_muted(true).unwrap();
        prefs.set_fullscreen(true).unwrap();
        prefs.set_last_room_url("/@/org/world/room").unwrap();

        assert_eq!(prefs.name().as_deref(), Some("alice"));
        assert_eq!(prefs.player_character_index(), Some(3));
        assert_eq!(prefs.game_quality(), 30);
        assert_eq!(prefs.video_quality(), 5);
        assert_eq!(prefs.audio_player_volume(), 0.35);
        assert!(prefs.audio_player_muted());
        assert!(prefs.fullscreen());
        assert_eq!(prefs.last_room_url(), "/@/org/world/room");
    }

    #[test]
    fn test_flags_can_be_cleared() {
        let (_, prefs) = setup();
        prefs.set_audio_player_muted(true).unwrap();
        prefs.set_audio_player_muted(false).unwrap();
        prefs.set_fullscreen(false).unwrap();
        assert!(!prefs.audio_player_muted());
        assert!(!prefs.fullscreen());
    }

    #[test]
    fn test_help_camera_flag_uses_marker() {
        let (store, prefs) = setup();
        prefs.set_help_camera_settings_shown().unwrap();
        assert!(prefs.help_camera_settings_shown());
        assert_eq!(store.get(keys::HELP_CAMERA_SETTINGS_SHOWN).as_deref(), Some("1"));

        store.set(keys::HELP_CAMERA_SETTINGS_SHOWN, "true").unwrap();
        assert!(!prefs.help_camera_settings_shown());
    }

    #[test]
    fn test_invalid_name_is_hidden() {
        let (_, prefs) = setup();
        prefs.set_name("has space").unwrap();
        assert_eq!(prefs.name(), None);
        prefs.set_name("").unwrap();
        assert_eq!(prefs.name(), None);
    }

    #[test]
    fn test_structured_round_trips() {
        let (store, prefs) = setup();
        prefs.set_custom_cursor_position(2, &[0, 4, 1]).unwrap();
        prefs
            .set_character_layers(&["male1".to_string(), "hair_2".to_string()])
            .unwrap();

        assert_eq!(
            prefs.custom_cursor_position(),
            Some(CustomCursorPosition::new(2, vec![0, 4, 1]))
        );
        assert_eq!(
            store.get(keys::CUSTOM_CURSOR_POSITION).as_deref(),
            Some(r#"{"activeRow":2,"selectedLayers":[0,4,1]}"#)
        );
        assert_eq!(
            prefs.character_layers(),
            Some(vec!["male1".to_string(), "hair_2".to_string()])
        );
    }

    #[test]
    #[traced_test]
    fn test_malformed_structured_values_read_as_absent() {
        let (store, prefs) = setup();
        store.set(keys::CUSTOM_CURSOR_POSITION, "{\"activeRow\":").unwrap();
        store.set(keys::CHARACTER_LAYERS, "{\"not\":\"a list\"}").unwrap();
        store.set(keys::COMPANION, "[1,2]").unwrap();
        store.set(keys::LOCAL_USER, "garbage").unwrap();

        assert_eq!(prefs.custom_cursor_position(), None);
        assert_eq!(prefs.character_layers(), None);
        assert_eq!(prefs.companion(), None);
        assert_eq!(prefs.local_user(), None);
        assert!(logs_contain("stored preference ignored"));
    }

    #[test]
    fn test_cursor_position_with_wrong_shape_is_absent() {
        let (store, prefs) = setup();
        store
            .set(keys::CUSTOM_CURSOR_POSITION, r#"{"activeRow":"two","selectedLayers":[]}"#)
            .unwrap();
        assert_eq!(prefs.custom_cursor_position(), None);
        store.set(keys::CUSTOM_CURSOR_POSITION, "null").unwrap();
        assert_eq!(prefs.custom_cursor_position(), None);
    }

    #[test]
    fn test_invalid_layers_are_rejected_after_parsing() {
        let (_, prefs) = setup();
        prefs.set_character_layers(&[]).unwrap();
        assert_eq!(prefs.character_layers(), None);
        prefs
            .set_character_layers(&["ok".to_string(), "not ok".to_string()])
            .unwrap();
        assert_eq!(prefs.character_layers(), None);
    }

    #[test]
    fn test_malformed_numbers_fall_back() {
        let (store, prefs) = setup();
        store.set(keys::SELECTED_PLAYER, "abc").unwrap();
        store.set(keys::GAME_QUALITY, "high").unwrap();
        store.set(keys::VIDEO_QUALITY, "-4").unwrap();
        store.set(keys::AUDIO_VOLUME, "loud").unwrap();

        assert_eq!(prefs.player_character_index(), None);
        assert_eq!(prefs.game_quality(), 60);
        assert_eq!(prefs.video_quality(), 20);
        assert_eq!(prefs.audio_player_volume(), 1.0);
    }

    #[test]
    fn test_negative_quality_reads_as_default() {
        let (store, prefs) = setup();
        store.set(keys::GAME_QUALITY, "-4").unwrap();
        store.set(keys::VIDEO_QUALITY, "-0").unwrap();
        assert_eq!(prefs.game_quality(), 60);
        assert_eq!(prefs.video_quality(), 0);
    }

    #[test]
    fn test_numbers_accept_leading_prefix() {
        let (store, prefs) = setup();
        store.set(keys::SELECTED_PLAYER, "7th").unwrap();
        store.set(keys::GAME_QUALITY, "45fps").unwrap();
        assert_eq!(prefs.player_character_index(), Some(7));
        assert_eq!(prefs.game_quality(), 45);
    }

    #[test]
    fn test_flags_reject_foreign_values() {
        let (store, prefs) = setup();
        store.set(keys::AUDIO_MUTE, "yes").unwrap();
        store.set(keys::FULLSCREEN, "1").unwrap();
        assert!(!prefs.audio_player_muted());
        assert!(!prefs.fullscreen());
    }

    #[test]
    fn test_companion_three_way_distinction() {
        let (store, prefs) = setup();
        assert_eq!(prefs.companion(), None);
        assert!(!prefs.was_companion_set());

        prefs.set_companion(None).unwrap();
        assert_eq!(prefs.companion(), None);
        assert!(prefs.was_companion_set());
        assert_eq!(store.get(keys::COMPANION).as_deref(), Some("null"));

        prefs.set_companion(Some("dog1")).unwrap();
        assert_eq!(prefs.companion().as_deref(), Some("dog1"));
        assert_eq!(store.get(keys::COMPANION).as_deref(), Some("\"dog1\""));
    }

    #[test]
    fn test_empty_companion_is_neither_value_nor_marker() {
        let (store, prefs) = setup();
        store.set(keys::COMPANION, "").unwrap();
        assert!(!prefs.was_companion_set());
        prefs.set_companion(Some("")).unwrap();
        assert!(prefs.was_companion_set());
        assert_eq!(prefs.companion(), None);
    }

    #[test]
    fn test_auth_token_none_removes_key() {
        let (store, prefs) = setup();
        prefs.set_auth_token(Some("bearer-abc")).unwrap();
        assert_eq!(prefs.auth_token().as_deref(), Some("bearer-abc"));

        prefs.set_auth_token(None).unwrap();
        assert_eq!(prefs.auth_token(), None);
        assert!(!store.contains(keys::AUTH_TOKEN));

        prefs.set_auth_token(Some("bearer-abc")).unwrap();
        prefs.set_auth_token(Some("")).unwrap();
        assert!(!store.contains(keys::AUTH_TOKEN));
    }

    #[test]
    fn test_local_user_round_trip() {
        let (_, prefs) = setup();
        let user = LocalUser::new(
            "3f1c".to_string(),
            "jwt.payload.sig".to_string(),
            Some(vec![CharacterTexture {
                id: 12,
                level: 0,
                url: "resources/characters/pipoya/Male 01-1.png".to_string(),
                rights: "".to_string(),
            }]),
        );
        prefs.save_user(&user).unwrap();
        assert_eq!(prefs.local_user(), Some(user));
    }

    #[test]
    fn test_snapshot_excludes_auth_token() {
        let (_, prefs) = setup();
        prefs.set_auth_token(Some("secret")).unwrap();
        prefs.set_name("bob").unwrap();
        let snapshot = prefs.snapshot();
        assert_eq!(snapshot.player_name.as_deref(), Some("bob"));
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("secret"));
    }
}
