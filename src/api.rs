use anyhow::Result;
use bytes::Bytes;
use futures::stream::BoxStream;

/// Raw line stream for one game: each item is one wire line with the
/// trailing newline stripped, and an empty item is a keep-alive. The
/// stream ends when the server closes it, normally only after a terminal
/// status was delivered.
pub type Feed = BoxStream<'static, Result<Bytes>>;

/// Server transport for a single game.
///
/// Implementations bridge to the actual HTTP/streaming layer; the session
/// loop only ever calls these four operations. All of them may fail with
/// transport-level errors: `game_stream` failures are retried by the
/// reader, while the three reporting calls are fire-and-forget from the
/// session's point of view.
#[async_trait::async_trait]
pub trait Api: Send + Sync {
    /// Open the long-lived event stream for a game.
    async fn game_stream(&self, game_id: &str) -> Result<Feed>;

    /// Report the local side's move, optionally offering a draw.
    async fn send_move(&self, game_id: &str, mv: &str, offer_draw: bool) -> Result<()>;

    /// Resign the game.
    async fn resign_game(&self, game_id: &str) -> Result<()>;

    /// Ask the server to abort a game that never really began.
    async fn abort_game(&self, game_id: &str) -> Result<()>;
}
