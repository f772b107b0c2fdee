//! Win conditions.

use serde::{Deserialize, Serialize};

use crate::core::{side_of, ActorId, Population, Role, Side, WinRule};
use crate::roster::Roster;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameResult {
    /// The side that won.
    pub winner: Side,
}

impl GameResult {
    /// Check if a role won.
    #[must_use]
    pub fn is_winner(&self, role: Role) -> bool {
        side_of(role) == self.winner
    }

    /// Seats (alive or dead) on the winning side.
    #[must_use]
    pub fn winners(&self, roster: &Roster) -> Vec<ActorId> {
        roster
            .iter()
            .filter(|a| self.is_winner(a.role))
            .map(|a| a.id)
            .collect()
    }
}

/// Evaluates win conditions from faction populations.
pub struct WinEvaluator;

impl WinEvaluator {
    /// Check the roster against `rule`.
    #[must_use]
    pub fn evaluate(roster: &Roster, rule: WinRule) -> Option<GameResult> {
        Self::judge(roster.population(), roster.dealt_population(), rule)
    }

    /// Decide from alive and dealt populations.
    ///
    /// Under [`WinRule::Edge`] a faction only counts as wiped out if it was
    /// dealt at least one seat.
    #[must_use]
    pub fn judge(alive: Population, dealt: Population, rule: WinRule) -> Option<GameResult> {
        let winner = if alive.aggressors == 0 {
            Some(Side::Village)
        } else if alive.village() == 0 {
            Some(Side::Aggressors)
        } else {
            match rule {
                WinRule::Massacre => None,
                WinRule::Edge => {
                    let specialists_gone = dealt.specialists > 0 && alive.specialists == 0;
                    let commoners_gone = dealt.commoners > 0 && alive.commoners == 0;
                    (specialists_gone || commoners_gone).then_some(Side::Aggressors)
                }
            }
        };
        winner.map(|winner| GameResult { winner })
    }
}
