use serde::{Deserialize, Serialize};

/// A character texture granted to a player.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CharacterTexture {
    pub id: i64,
    pub level: i64,
    pub url: String,
    pub rights: String,
}

/// The identity the client got back from the last successful login.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalUser {
    pub uuid: String,
    pub jwt_token: String,
    #[serde(default)]
    pub textures: Vec<CharacterTexture>,
}

impl LocalUser {
    pub fn new(uuid: String, jwt_token: String, textures: Option<Vec<CharacterTexture>>) -> Self {
        LocalUser {
            uuid,
            jwt_token,
            textures: textures.unwrap_or_default(),
        }
    }
}
