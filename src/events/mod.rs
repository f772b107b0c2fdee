//! Broadcast log and its entries.
//!
//! The engine announces phase changes, speeches, private night results,
//! vote tallies, and deaths here. Readers query a per-actor view; the
//! engine's copy is never handed out mutably.
//!
//! ## Key Components
//!
//! - [`Audience`]: Who may read an entry
//! - [`Message`]: What happened
//! - [`LogEntry`]: A sequenced, round-stamped message
//! - [`BroadcastLog`]: Append-only storage and per-actor filtering

mod event;
mod log;

pub use event::{Audience, LogEntry, Message};
pub use log::BroadcastLog;
