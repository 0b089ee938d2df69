use serde::{Deserialize, Serialize};

use super::local_user::LocalUser;

/// Where the character customisation cursor was left.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomCursorPosition {
    pub active_row: u32,
    pub selected_layers: Vec<u32>,
}

impl CustomCursorPosition {
    pub fn new(active_row: u32, selected_layers: Vec<u32>) -> Self {
        CustomCursorPosition {
            active_row,
            selected_layers,
        }
    }
}

/// Every decoded preference at one point in time.
///
/// The auth token is deliberately not part of the snapshot.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSnapshot {
    pub player_name: Option<String>,
    pub player_character_index: Option<i32>,
    pub custom_cursor_position: Option<CustomCursorPosition>,
    pub character_layers: Option<Vec<String>>,
    pub companion: Option<String>,
    pub companion_set: bool,
    pub game_quality: u32,
    pub video_quality: u32,
    pub audio_volume: f64,
    pub audio_muted: bool,
    pub help_camera_settings_shown: bool,
    pub fullscreen: bool,
    pub last_room_url: String,
    pub local_user: Option<LocalUser>,
}
