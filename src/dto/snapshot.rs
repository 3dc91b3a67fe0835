use super::Update;
use serde::Deserialize;
use serde_json::Value;

/// Full description of a game, delivered as the first event of every
/// connection. The side blocks stay opaque `Value`s: the session loop
/// never reads them, it only hands the snapshot to the player.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub rated: bool,
    #[serde(default)]
    pub speed: String,
    #[serde(default)]
    pub initial_fen: String,
    #[serde(default)]
    pub white: Value,
    #[serde(default)]
    pub black: Value,
    #[serde(default)]
    pub clock: Value,
    pub state: Update,
}
