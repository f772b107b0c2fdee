//! Core engine types: actors, roles, phases, actions, state, RNG, configuration.
//!
//! These are the building blocks every other module is written against. The
//! resolvers and the gateway never add new vocabulary; they combine these.

pub mod actor;
pub mod role;
pub mod rng;
pub mod config;
pub mod phase;
pub mod action;
pub mod error;
pub mod state;

pub use actor::{ActorId, ActorMap};
pub use role::{faction_of, is_aggressive, side_of, Faction, Population, Role, Side};
pub use rng::GameRng;
pub use config::{EngineConfig, VoteTiePolicy, WinRule};
pub use phase::{NightStep, Phase};
pub use action::{Action, ActionKind, ActionRecord};
pub use error::{GameError, SetupError};
pub use state::GameState;
