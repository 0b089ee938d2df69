//! Stable key names in the key-value substrate.
//!
//! Renaming any of these orphans data persisted by earlier versions.

pub const PLAYER_NAME: &str = "playerName";
pub const SELECTED_PLAYER: &str = "selectedPlayer";
pub const CUSTOM_CURSOR_POSITION: &str = "customCursorPosition";
pub const CHARACTER_LAYERS: &str = "characterLayers";
pub const COMPANION: &str = "companion";
pub const GAME_QUALITY: &str = "gameQuality";
pub const VIDEO_QUALITY: &str = "videoQuality";
pub const AUDIO_VOLUME: &str = "audioVolume";
pub const AUDIO_MUTE: &str = "audioMute";
pub const HELP_CAMERA_SETTINGS_SHOWN: &str = "helpCameraSettingsShown";
pub const FULLSCREEN: &str = "fullscreen";
pub const LAST_ROOM_URL: &str = "lastRoomUrl";
pub const AUTH_TOKEN: &str = "authToken";
pub const STATE: &str = "state";
pub const NONCE: &str = "nonce";
pub const LOCAL_USER: &str = "localUser";
