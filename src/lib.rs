//! # rust-deduction
//!
//! The authoritative rules engine for a social-deduction party game.
//!
//! A fixed table of actors is secretly dealt roles. The aggressors pick a
//! victim each night; the village has an Inspector, a Medic with one
//! antidote and one poison, and a Marksman who may retaliate on death. Days
//! are for discussion and an elimination vote. The game ends when either
//! side is wiped out.
//!
//! ## Design Principles
//!
//! 1. **Validate, then mutate**: Every submission passes the gateway before
//!    any state changes. A rejection never leaves a trace.
//!
//! 2. **One writer**: `Game` owns the state. Concurrent agents go through the
//!    session `Room`, which serializes their replies.
//!
//! 3. **Deterministic**: The same deal and the same submissions always
//!    produce the same game, down to the broadcast log.
//!
//! ## Architecture
//!
//! - **Sub-phases**: Night is split into kill, inspect, and remedy steps so
//!   that exactly one kind of decision is open at a time.
//!
//! - **Death queue**: Deaths apply one at a time with a win check after each,
//!   so a retaliation can end the game before anything else resolves.
//!
//! - **Persistent Data Structures**: The log and history use `im-rs`, so
//!   views and snapshots clone cheaply.
//!
//! ## Modules
//!
//! - `core`: Actor ids, roles, phases, actions, errors, state, RNG, configuration
//! - `roster`: Seats, roles, life status, and one-shot resources
//! - `events`: Broadcast log with per-actor visibility
//! - `phases`: Sub-phase scheduling
//! - `rules`: Night and vote resolution, death queue, win conditions
//! - `gateway`: Submission validation and buffering
//! - `engine`: The `Game` facade and per-actor views
//! - `session`: Async agents and the single-writer room

pub mod core;
pub mod roster;
pub mod events;
pub mod phases;
pub mod rules;
pub mod gateway;
pub mod engine;
pub mod session;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    ActorId, ActorMap,
    Role, Faction, Side, Population,
    Phase, NightStep,
    Action, ActionKind, ActionRecord,
    EngineConfig, VoteTiePolicy, WinRule,
    GameError, SetupError,
    GameRng, GameState,
};

pub use crate::roster::{
    Roster, RosterBuilder, RoleSet, ActorRecord,
    DeathCause, LifeStatus, Resource, Inspection,
};

pub use crate::events::{Audience, BroadcastLog, LogEntry, Message};

pub use crate::phases::PhaseScheduler;

pub use crate::rules::{
    GameResult, WinEvaluator,
    NightResolver, VoteResolver, VoteOutcome,
    DeathQueue,
};

pub use crate::gateway::{ActionGateway, DecisionBuffer};

pub use crate::engine::{Accepted, ActorView, Game, PrivateKnowledge};

pub use crate::session::{Agent, AgentError, Prompt, RandomAgent, Room, SilentAgent, Submission};
