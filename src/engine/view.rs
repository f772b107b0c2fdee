//! Per-actor views of the game.
//!
//! A view holds exactly what one seat may know: public table state plus
//! the private knowledge its role grants. It is a copy; mutating it never
//! touches the engine.

use serde::{Deserialize, Serialize};

use crate::core::{ActorId, GameState, Phase, Role};
use crate::roster::{DeathCause, Inspection};

/// A publicly announced death.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathNotice {
    /// Who died.
    pub actor: ActorId,
    /// Cause, if causes are disclosed.
    pub cause: Option<DeathCause>,
}

/// Knowledge only the viewer's role has.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivateKnowledge {
    /// Commoners know nothing extra.
    None,
    /// Aggressors know each other and tonight's choice.
    Aggressor {
        /// Every aggressor seat, alive or dead, including the viewer.
        pack: Vec<ActorId>,
        /// Tonight's consensus target, once chosen.
        chosen: Option<ActorId>,
    },
    /// The Inspector's check history.
    Inspector {
        /// Every check so far, oldest first.
        checks: Vec<Inspection>,
    },
    /// The Medic's resources and tonight's victim.
    Medic {
        /// Antidote unspent.
        antidote: bool,
        /// Poison unspent.
        poison: bool,
        /// Tonight's pending kill target, once chosen.
        pending_kill: Option<ActorId>,
    },
    /// The Marksman's retaliation.
    Marksman {
        /// Retaliation unspent.
        can_retaliate: bool,
    },
}

/// What one actor may know about the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorView {
    /// The viewer.
    pub actor: ActorId,
    /// The viewer's role.
    pub role: Role,
    /// Whether the viewer is alive.
    pub alive: bool,
    /// Current round.
    pub round: u32,
    /// Open sub-phase.
    pub phase: Phase,
    /// Alive seats, in seat order.
    pub alive_actors: Vec<ActorId>,
    /// Deaths from the most recent resolution.
    pub recent_deaths: Vec<DeathNotice>,
    /// Whether the open sub-phase waits for the viewer.
    pub awaiting_input: bool,
    /// Role-private knowledge.
    pub private: PrivateKnowledge,
}

impl ActorView {
    /// Build the view of `actor`. `None` if the seat does not exist.
    pub(crate) fn build(state: &GameState, actor: ActorId, disclose_causes: bool) -> Option<Self> {
        let record = state.roster().get(actor)?;
        let night_target = state.night().pending_kill().filter(|_| state.phase().is_night());

        let private = match record.role {
            Role::Commoner => PrivateKnowledge::None,
            Role::Aggressor => PrivateKnowledge::Aggressor {
                pack: state.roster().with_role(Role::Aggressor).map(|a| a.id).collect(),
                chosen: night_target,
            },
            Role::Inspector => PrivateKnowledge::Inspector {
                checks: record.kit().checks().to_vec(),
            },
            Role::Medic => PrivateKnowledge::Medic {
                antidote: record.antidote_available(),
                poison: record.poison_available(),
                pending_kill: night_target,
            },
            Role::Marksman => PrivateKnowledge::Marksman {
                can_retaliate: record.can_retaliate(),
            },
        };

        Some(Self {
            actor,
            role: record.role,
            alive: record.is_alive(),
            round: state.round(),
            phase: state.phase(),
            alive_actors: state.roster().alive_ids(),
            recent_deaths: state
                .recent_deaths()
                .iter()
                .map(|&(actor, cause)| DeathNotice {
                    actor,
                    cause: disclose_causes.then_some(cause),
                })
                .collect(),
            awaiting_input: state.scheduler().is_expected(actor)
                && !state.scheduler().has_submitted(actor),
            private,
        })
    }
}
