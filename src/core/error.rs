//! Engine error types.
//!
//! Every rejection is reported before any state is touched: validation fully
//! precedes mutation, so an `Err` always means "nothing changed".

use thiserror::Error;

use super::action::ActionKind;
use super::actor::ActorId;
use super::phase::Phase;
use crate::roster::Resource;

/// Why a submission or engine operation was rejected.
#[derive(Debug, Error)]
pub enum GameError {
    /// The game is decided; nothing else is accepted.
    #[error("game has ended")]
    GameEnded,

    /// The actor is not seated, or is dead and not the pending retaliator.
    #[error("{0} is unknown or dead")]
    UnknownOrDeadActor(ActorId),

    /// The open sub-phase does not take this action from this actor.
    #[error("{actor} cannot {kind} during {phase}")]
    InvalidPhase {
        /// Submitting actor.
        actor: ActorId,
        /// What they tried to do.
        kind: ActionKind,
        /// The sub-phase that was open.
        phase: Phase,
    },

    /// A one-shot resource the action needs is already spent.
    #[error("{actor} has no {resource} left")]
    ResourceExhausted {
        /// Submitting actor.
        actor: ActorId,
        /// The spent resource.
        resource: Resource,
    },

    /// The target is unknown, dead, or not allowed for this action.
    #[error("{actor} cannot target {target}: {reason}")]
    InvalidTarget {
        /// Submitting actor.
        actor: ActorId,
        /// The rejected target.
        target: ActorId,
        /// Which rule the target broke.
        reason: &'static str,
    },

    /// A snapshot could not be written or read.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// Why a roster could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// No roles were provided.
    #[error("roster is empty")]
    Empty,

    /// More than 255 seats.
    #[error("{0} actors exceeds the 255 seat limit")]
    TooManyActors(usize),

    /// Nobody was dealt an aggressive role.
    #[error("roster has no aggressor")]
    NoAggressor,

    /// Everybody was dealt an aggressive role.
    #[error("roster has no non-aggressor")]
    NoVillage,

    /// The same seat appears twice in an explicit assignment.
    #[error("{0} is assigned more than once")]
    DuplicateActor(ActorId),

    /// Explicit assignments must cover seats `1..=n` exactly.
    #[error("{0} is outside the seat range 1..={1}")]
    SeatOutOfRange(ActorId, usize),
}
