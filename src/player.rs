use crate::dto::Snapshot;
use crate::dto::Update;

/// What the player wants reported to the server for its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub mv: String,
    pub offer_draw: bool,
    pub resign: bool,
}

/// The decision-making side of a session: board state, clocks, and the
/// machinery that produces moves. Owned exclusively by the session loop,
/// created from the first snapshot of a game, and fed every later
/// snapshot and update until the game ends.
///
/// Implementations typically wrap an engine process plus a board model;
/// the session loop never looks inside. The async `best_move` is the one
/// intentionally blocking point of a session: while it computes, no other
/// events are dispatched. `ponder` exists to move that computation into
/// the opponent's thinking time instead.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Refresh from a full snapshot re-sent by the server, typically
    /// after the stream reconnected.
    fn absorb(&mut self, snapshot: &Snapshot);

    /// Apply an incremental update. Returns whether the update carried
    /// anything new relative to the state already acted upon.
    fn advance(&mut self, update: &Update) -> bool;

    /// Is it the local side's turn to move.
    fn is_our_turn(&self) -> bool;

    /// Can this game still be aborted without result consequences.
    fn is_abortable(&self) -> bool;

    /// Decided by game rules, independent of the server's status field.
    fn is_over(&self) -> bool;

    /// Non-blocking hint to start computing on the opponent's time.
    fn ponder(&mut self);

    /// Produce the best move available given the computation done so far.
    async fn best_move(&mut self) -> Decision;

    /// Human-readable result line for the finished game.
    fn result_message(&self, winner: Option<&str>) -> String;

    /// Short evaluation of the current position, for chat display.
    fn eval_message(&self) -> String;

    /// Release engine resources and stop any background computation.
    /// Called exactly once when the session terminates.
    fn conclude(&mut self);
}
