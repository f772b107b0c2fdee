//! Session boundary between the engine and its collaborators.
//!
//! Agents decide; the room validates through the engine and applies. The
//! room owns the game, so all mutations are serialized through it no matter
//! how many agents answer at once.
//!
//! ## Key Components
//!
//! - [`Agent`]: Async decision maker for one seat
//! - [`Room`]: Single-writer game loop with per-sub-phase deadlines and a
//!   shutdown signal
//! - [`RandomAgent`], [`SilentAgent`]: Built-in agents for tests and demos

mod agent;
mod agents;
mod room;
mod seat;

pub use agent::{Agent, AgentError, Prompt, Submission};
pub use agents::{RandomAgent, SilentAgent};
pub use room::Room;
