//! Phases and sub-phases of the day/night cycle.

use serde::{Deserialize, Serialize};

/// Ordered sub-phases of a night.
///
/// Each step accepts exactly one category of decision. Steps with nobody to
/// ask are skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NightStep {
    /// Aggressors pick a kill target.
    Kill,
    /// The Inspector checks one actor.
    Inspect,
    /// The Medic saves, poisons, or abstains.
    Remedy,
}

impl NightStep {
    /// The step after this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<NightStep> {
        match self {
            NightStep::Kill => Some(NightStep::Inspect),
            NightStep::Inspect => Some(NightStep::Remedy),
            NightStep::Remedy => None,
        }
    }
}

/// The currently open sub-phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// One step of the night.
    Night(NightStep),
    /// Open discussion.
    DayDiscuss,
    /// Elimination vote.
    DayVote,
    /// A dead Marksman picks a retaliation target.
    HunterResolve,
    /// The game is decided.
    Ended,
}

impl Phase {
    /// Whether this is any night step.
    #[must_use]
    pub const fn is_night(self) -> bool {
        matches!(self, Phase::Night(_))
    }

    /// Whether the game is over.
    #[must_use]
    pub const fn is_ended(self) -> bool {
        matches!(self, Phase::Ended)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Night(NightStep::Kill) => f.write_str("Night/Kill"),
            Phase::Night(NightStep::Inspect) => f.write_str("Night/Inspect"),
            Phase::Night(NightStep::Remedy) => f.write_str("Night/Remedy"),
            Phase::DayDiscuss => f.write_str("DayDiscuss"),
            Phase::DayVote => f.write_str("DayVote"),
            Phase::HunterResolve => f.write_str("HunterResolve"),
            Phase::Ended => f.write_str("Ended"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_step_order() {
        assert_eq!(NightStep::Kill.next(), Some(NightStep::Inspect));
        assert_eq!(NightStep::Inspect.next(), Some(NightStep::Remedy));
        assert_eq!(NightStep::Remedy.next(), None);
    }

    #[test]
    fn test_phase_predicates() {
        assert!(Phase::Night(NightStep::Kill).is_night());
        assert!(!Phase::DayVote.is_night());
        assert!(Phase::Ended.is_ended());
        assert_eq!(format!("{}", Phase::Night(NightStep::Remedy)), "Night/Remedy");
    }
}
