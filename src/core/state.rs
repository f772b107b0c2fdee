//! Game state.
//!
//! ## GameState
//!
//! Everything the engine owns between submissions:
//! - Round counter and open sub-phase (via the scheduler)
//! - Roster (roles, life status, resources)
//! - Broadcast log and action history
//! - Transient buffers for the open sub-phase and the current night
//! - The death queue, which may be suspended mid-drain waiting for a
//!   retaliation
//!
//! Uses `im` persistent collections for the log and history, so cloning a
//! state for a snapshot or a view is cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::actor::ActorId;
use super::phase::Phase;
use crate::events::BroadcastLog;
use crate::gateway::DecisionBuffer;
use crate::phases::PhaseScheduler;
use crate::roster::{DeathCause, Roster};
use crate::rules::{DeathQueue, GameResult, NightResolver};

/// Complete engine state.
///
/// Fields are crate-private: only the gateway, the resolvers, and the death
/// queue write to them, and only through [`crate::engine::Game`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) roster: Roster,
    pub(crate) scheduler: PhaseScheduler,
    pub(crate) buffer: DecisionBuffer,
    pub(crate) night: NightResolver,
    pub(crate) deaths: DeathQueue,
    pub(crate) log: BroadcastLog,
    pub(crate) history: Vector<ActionRecord>,
    pub(crate) recent_deaths: Vec<(ActorId, DeathCause)>,
    pub(crate) result: Option<GameResult>,
    action_sequence: u32,
}

impl GameState {
    /// Create the state for a freshly dealt roster. No sub-phase is open yet.
    #[must_use]
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            scheduler: PhaseScheduler::new(),
            buffer: DecisionBuffer::new(),
            night: NightResolver::new(),
            deaths: DeathQueue::new(),
            log: BroadcastLog::new(),
            history: Vector::new(),
            recent_deaths: Vec::new(),
            result: None,
            action_sequence: 0,
        }
    }

    /// Current round (starts at 1 once the first night opens).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.scheduler.round()
    }

    /// The open sub-phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    /// The roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &PhaseScheduler {
        &self.scheduler
    }

    /// Tonight's resolver state.
    #[must_use]
    pub fn night(&self) -> &NightResolver {
        &self.night
    }

    /// The full, unfiltered broadcast log.
    #[must_use]
    pub fn log(&self) -> &BroadcastLog {
        &self.log
    }

    /// Accepted actions, oldest first. Overwritten submissions stay here.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Deaths applied by the most recent resolution, in order.
    #[must_use]
    pub fn recent_deaths(&self) -> &[(ActorId, DeathCause)] {
        &self.recent_deaths
    }

    /// The outcome, once decided.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Whether the game is over.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Record an accepted action and return its sequence number.
    pub(crate) fn record_action(&mut self, actor: ActorId, action: Action) -> u32 {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.history.push_back(ActionRecord::new(
            actor,
            action,
            self.round(),
            self.phase(),
            sequence,
        ));
        sequence
    }
}
