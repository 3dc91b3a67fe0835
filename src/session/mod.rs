//! Async runtime for one live game session.
//!
//! This module owns the concurrency of a session, coordinating between
//! the server's event stream and the decision-making player through a
//! single message-passing channel.
//!
//! ## Architecture
//!
//! - [`Session`] — State machine popping events in arrival order and
//!   driving moves, aborts, and termination
//! - [`Reader`] — Background task that owns the transport stream, decodes
//!   lines, and survives disconnects under the retry policy
//! - [`Queue`] — Unbounded FIFO hand-off from reader to session
//! - [`Event`] — Decoded or synthesized messages the session dispatches on

mod event;
mod queue;
mod reader;
mod session;

pub use event::*;
pub use queue::*;
pub use reader::*;
pub use session::*;
