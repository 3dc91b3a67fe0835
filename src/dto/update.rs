use serde::Deserialize;

/// Incremental game state: the move list so far, both clocks, and the
/// server's status verdict. Sent after every move and embedded inside
/// each full snapshot. Clock values are milliseconds.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Update {
    #[serde(default)]
    pub moves: String,
    #[serde(default)]
    pub wtime: u64,
    #[serde(default)]
    pub btime: u64,
    #[serde(default)]
    pub winc: u64,
    #[serde(default)]
    pub binc: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub winner: Option<String>,
}
