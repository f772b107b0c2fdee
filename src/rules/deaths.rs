//! Death queue.
//!
//! Deaths are applied one at a time, in FIFO order. After each death the win
//! condition is checked; a decided game discards whatever is still queued.
//! A Marksman dying of anything but poison suspends the queue until the
//! retaliation is known.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{ActorId, Role, WinRule};
use crate::roster::{DeathCause, Roster};

use super::win::{GameResult, WinEvaluator};

/// Why [`DeathQueue::drain`] stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Drain {
    /// The queue is empty and the game continues.
    Settled,
    /// A Marksman died and may retaliate; the rest of the queue waits.
    Retaliation(ActorId),
    /// The game is decided; the rest of the queue was discarded.
    Decided(GameResult),
}

/// FIFO worklist of pending deaths.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathQueue {
    pending: VecDeque<(ActorId, DeathCause)>,
}

impl DeathQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of deaths waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queue a death at the back.
    pub(crate) fn push(&mut self, actor: ActorId, cause: DeathCause) {
        self.pending.push_back((actor, cause));
    }

    /// Apply queued deaths until the queue empties, a retaliation is owed,
    /// or the game is decided.
    ///
    /// `on_death` runs once per applied death, after the roster is updated
    /// and before the win check.
    pub(crate) fn drain(
        &mut self,
        roster: &mut Roster,
        round: u32,
        rule: WinRule,
        mut on_death: impl FnMut(ActorId, DeathCause),
    ) -> Drain {
        while let Some((actor, cause)) = self.pending.pop_front() {
            let Some(record) = roster.get_mut(actor) else {
                continue;
            };
            if !record.kill(cause, round) {
                debug!(%actor, %cause, "already dead, entry discarded");
                continue;
            }
            let owes_retaliation = record.role == Role::Marksman && record.can_retaliate();
            info!(%actor, %cause, round, "death applied");
            on_death(actor, cause);

            if let Some(result) = WinEvaluator::evaluate(roster, rule) {
                self.pending.clear();
                return Drain::Decided(result);
            }
            if owes_retaliation {
                return Drain::Retaliation(actor);
            }
        }
        Drain::Settled
    }
}
