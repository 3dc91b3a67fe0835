use serde::Deserialize;

/// One chat message, addressed either to the players or the spectators.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChatLine {
    pub username: String,
    pub text: String,
    pub room: Room,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Room {
    Player,
    Spectator,
}
