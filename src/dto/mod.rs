//! Wire payloads of the server's game event protocol.

mod chat_line;
mod snapshot;
mod status;
mod update;

pub use chat_line::*;
pub use snapshot::*;
pub use status::*;
pub use update::*;
