//! Action representation.
//!
//! An action is a verb plus at most one target. The engine never chooses
//! actions; it validates and buffers what actors submit.
//!
//! Speech is not an `Action`: it only appends to the broadcast log and is
//! submitted through its own entry point.

use serde::{Deserialize, Serialize};

use super::actor::ActorId;
use super::phase::Phase;

/// A gameplay decision submitted by one actor.
///
/// ## Example
///
/// ```
/// use rust_deduction::core::{Action, ActionKind, ActorId};
///
/// let kill = Action::Kill(ActorId::new(4));
/// assert_eq!(kill.kind(), ActionKind::Kill);
/// assert_eq!(kill.target(), Some(ActorId::new(4)));
///
/// let hold = Action::Retaliate(None);
/// assert_eq!(hold.target(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Aggressor nominates tonight's victim.
    Kill(ActorId),
    /// Inspector checks an actor's faction.
    Inspect(ActorId),
    /// Medic spends the antidote on the pending kill target.
    Save(ActorId),
    /// Medic spends the poison.
    Poison(ActorId),
    /// Day vote for elimination.
    Vote(ActorId),
    /// Dead Marksman fires at a target, or holds fire with `None`.
    Retaliate(Option<ActorId>),
    /// Explicitly pass in the open sub-phase.
    Abstain,
}

/// The category of an action, independent of its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// See [`Action::Kill`].
    Kill,
    /// See [`Action::Inspect`].
    Inspect,
    /// See [`Action::Save`].
    Save,
    /// See [`Action::Poison`].
    Poison,
    /// See [`Action::Vote`].
    Vote,
    /// See [`Action::Retaliate`].
    Retaliate,
    /// See [`Action::Abstain`].
    Abstain,
    /// A discussion speech.
    Speech,
}

impl Action {
    /// The category of this action.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Action::Kill(_) => ActionKind::Kill,
            Action::Inspect(_) => ActionKind::Inspect,
            Action::Save(_) => ActionKind::Save,
            Action::Poison(_) => ActionKind::Poison,
            Action::Vote(_) => ActionKind::Vote,
            Action::Retaliate(_) => ActionKind::Retaliate,
            Action::Abstain => ActionKind::Abstain,
        }
    }

    /// The target of this action, if it has one.
    #[must_use]
    pub const fn target(&self) -> Option<ActorId> {
        match *self {
            Action::Kill(t)
            | Action::Inspect(t)
            | Action::Save(t)
            | Action::Poison(t)
            | Action::Vote(t) => Some(t),
            Action::Retaliate(t) => t,
            Action::Abstain => None,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::Kill => "kill",
            ActionKind::Inspect => "inspect",
            ActionKind::Save => "save",
            ActionKind::Poison => "poison",
            ActionKind::Vote => "vote",
            ActionKind::Retaliate => "retaliate",
            ActionKind::Abstain => "abstain",
            ActionKind::Speech => "speech",
        };
        f.write_str(name)
    }
}

/// An accepted action with metadata for history tracking.
///
/// Used for replay and debugging. Overwritten submissions stay in history;
/// only the buffered decision is replaced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The actor who submitted the action.
    pub actor: ActorId,

    /// The action taken.
    pub action: Action,

    /// Round when the action was accepted.
    pub round: u32,

    /// Sub-phase the action was accepted in.
    pub phase: Phase,

    /// Sequence number across the whole game.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(actor: ActorId, action: Action, round: u32, phase: Phase, sequence: u32) -> Self {
        Self {
            actor,
            action,
            round,
            phase,
            sequence,
        }
    }
}
