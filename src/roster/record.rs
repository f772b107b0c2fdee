//! Per-actor record: role, kit, life status, and informational counters.

use serde::{Deserialize, Serialize};

use crate::core::{ActorId, Role};

use super::kit::{Resource, RoleKit};

/// Why an actor died.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// The aggressors' night kill.
    Wolf,
    /// The Medic's poison.
    Poison,
    /// Eliminated by the day vote.
    Vote,
    /// Shot by a dying Marksman.
    Retaliation,
}

impl std::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeathCause::Wolf => f.write_str("wolf"),
            DeathCause::Poison => f.write_str("poison"),
            DeathCause::Vote => f.write_str("vote"),
            DeathCause::Retaliation => f.write_str("retaliation"),
        }
    }
}

/// Alive, or dead with a cause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeStatus {
    /// Still in the game.
    Alive,
    /// Out of the game.
    Dead {
        /// How the actor died.
        cause: DeathCause,
        /// Round of death.
        round: u32,
    },
}

/// Informational counters. Never consulted by the rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Nights resolved while alive.
    pub nights_survived: u32,
    /// Votes cast by a non-aggressor against an aggressor.
    pub correct_votes: u32,
    /// Poison or retaliation spent on a non-aggressor.
    pub mistakes: u32,
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRecord {
    /// Seat id.
    pub id: ActorId,
    /// Dealt role; fixed for the game.
    pub role: Role,
    kit: RoleKit,
    status: LifeStatus,
    stats: Stats,
}

impl ActorRecord {
    /// A fresh, alive actor with the starting kit for `role`.
    #[must_use]
    pub fn new(id: ActorId, role: Role) -> Self {
        Self {
            id,
            role,
            kit: RoleKit::for_role(role),
            status: LifeStatus::Alive,
            stats: Stats::default(),
        }
    }

    /// Resource state.
    #[must_use]
    pub fn kit(&self) -> &RoleKit {
        &self.kit
    }

    /// Life status.
    #[must_use]
    pub fn status(&self) -> LifeStatus {
        self.status
    }

    /// Informational counters.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Whether the actor is alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        matches!(self.status, LifeStatus::Alive)
    }

    /// Cause of death, if dead.
    #[must_use]
    pub fn death_cause(&self) -> Option<DeathCause> {
        match self.status {
            LifeStatus::Alive => None,
            LifeStatus::Dead { cause, .. } => Some(cause),
        }
    }

    /// Medic antidote still available.
    #[must_use]
    pub fn antidote_available(&self) -> bool {
        self.kit.has(Resource::Antidote)
    }

    /// Medic poison still available.
    #[must_use]
    pub fn poison_available(&self) -> bool {
        self.kit.has(Resource::Poison)
    }

    /// Marksman retaliation still available.
    #[must_use]
    pub fn can_retaliate(&self) -> bool {
        self.kit.has(Resource::Retaliation)
    }

    /// Mark the actor dead. A poisoned Marksman loses the retaliation.
    ///
    /// Returns false (and changes nothing) if the actor was already dead.
    pub(crate) fn kill(&mut self, cause: DeathCause, round: u32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.status = LifeStatus::Dead { cause, round };
        if cause == DeathCause::Poison {
            self.kit.spend(Resource::Retaliation);
        }
        true
    }

    pub(crate) fn kit_mut(&mut self) -> &mut RoleKit {
        &mut self.kit
    }

    pub(crate) fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kill_is_idempotent() {
        let mut record = ActorRecord::new(ActorId::new(1), Role::Commoner);
        assert!(record.kill(DeathCause::Wolf, 1));
        assert!(!record.kill(DeathCause::Vote, 2));
        assert_eq!(record.death_cause(), Some(DeathCause::Wolf));
    }

    #[test]
    fn test_poison_revokes_retaliation() {
        let mut marksman = ActorRecord::new(ActorId::new(5), Role::Marksman);
        assert!(marksman.can_retaliate());

        marksman.kill(DeathCause::Poison, 1);
        assert!(!marksman.can_retaliate());
    }

    #[test]
    fn test_other_deaths_keep_retaliation() {
        let mut marksman = ActorRecord::new(ActorId::new(5), Role::Marksman);
        marksman.kill(DeathCause::Vote, 1);
        assert!(marksman.can_retaliate());
    }
}
