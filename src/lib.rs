//! Client-side runtime for one live session against a remote turn-based
//! game server.
//!
//! The server speaks a line-delimited event protocol over a long-lived
//! byte stream: full snapshots on (re)connect, incremental state updates,
//! chat lines, and empty keep-alive lines while nothing happens. This
//! crate turns that stream into a session lifecycle: a background
//! [`session::Reader`] decodes lines into [`session::Event`]s and feeds an
//! unbounded FIFO [`session::Queue`]; the [`session::Session`] loop pops
//! events in arrival order, tracks whose turn it is, asks the
//! [`player::Player`] collaborator for moves, and reports them through the
//! [`api::Api`] transport until the game reaches a terminal state.
//!
//! Everything game-specific lives behind traits: the transport
//! ([`api::Api`]), the decision engine ([`player::Player`]), and chat
//! ([`chat::Commentator`]). The session loop itself only knows about
//! turns, keep-alives, and termination.

pub mod api;
pub mod chat;
pub mod config;
pub mod dto;
pub mod player;
pub mod session;

/// Consecutive keep-alives tolerated before the session asks to abort.
/// The server sends one keep-alive every few seconds while the peer is
/// silent, so this bounds how long an abandoned game is allowed to idle.
pub const PING_ABORT_THRESHOLD: u32 = 10;
/// Abort requests issued before the session gives up waiting for the
/// server to acknowledge one and terminates on its own.
pub const MAX_ABORT_REQUESTS: u32 = 3;

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/session-{}.log", stamp)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
