//! Response payloads of the administrative backend.
//!
//! Fields this client does not know about are kept in `extra` so that nothing
//! the backend sends is lost on the way to the caller.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::local_user::CharacterTexture;

/// Room metadata returned by `/api/map`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapDetailsData {
    #[serde(default)]
    pub room_slug: Option<String>,
    pub map_url: String,
    #[serde(rename = "policy_type")]
    pub policy_type: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub textures: Vec<CharacterTexture>,
    #[serde(default)]
    pub contact_page: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Returned by `/api/map` instead of map details when the room moved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomRedirect {
    pub redirect_url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum MapDetails {
    Redirect(RoomRedirect),
    Details(MapDetailsData),
}

/// Member data resolved from an organization membership token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminApiData {
    pub room_url: String,
    pub email: Option<String>,
    pub map_url_start: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "policy_type")]
    pub policy_type: i64,
    pub user_uuid: String,
    #[serde(default)]
    pub messages: Vec<Value>,
    #[serde(default)]
    pub textures: Vec<CharacterTexture>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Member data resolved from a user identifier, room and IP.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FetchMemberDataByUuidResponse {
    pub user_uuid: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub visit_card_url: Option<String>,
    #[serde(default)]
    pub textures: Vec<CharacterTexture>,
    #[serde(default)]
    pub messages: Vec<Value>,
    #[serde(default)]
    pub anonymous: Option<bool>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Ban status for a user in a room.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AdminBannedData {
    pub is_banned: bool,
    pub message: String,
}

/// A complaint about another player, posted to `/api/report`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReport {
    pub reported_user_uuid: String,
    pub reported_user_comment: String,
    pub reporter_user_uuid: String,
    pub report_world_slug: String,
}
