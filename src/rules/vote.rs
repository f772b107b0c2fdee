//! Day vote resolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{is_aggressive, ActorId};
use crate::roster::Roster;

/// How a vote came out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteOutcome {
    /// One candidate had a strict plurality.
    Eliminated(ActorId),
    /// Several candidates shared the top count, in seat order.
    Tie(Vec<ActorId>),
    /// Nobody voted.
    NoVotes,
}

/// Counted ballots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Votes per candidate, in seat order. Candidates with no votes are absent.
    pub counts: Vec<(ActorId, u32)>,
    /// The result.
    pub outcome: VoteOutcome,
}

/// Counts ballots and credits correct votes.
pub struct VoteResolver;

impl VoteResolver {
    /// Count `(voter, target)` ballots.
    ///
    /// ```
    /// use rust_deduction::core::ActorId;
    /// use rust_deduction::rules::{VoteOutcome, VoteResolver};
    ///
    /// let a = ActorId::new;
    /// let tally = VoteResolver::tally([(a(1), a(3)), (a(2), a(3)), (a(3), a(1))]);
    /// assert_eq!(tally.outcome, VoteOutcome::Eliminated(a(3)));
    /// ```
    #[must_use]
    pub fn tally(ballots: impl IntoIterator<Item = (ActorId, ActorId)>) -> Tally {
        let mut counts: BTreeMap<ActorId, u32> = BTreeMap::new();
        for (_, target) in ballots {
            *counts.entry(target).or_insert(0) += 1;
        }

        let top = counts.values().copied().max().unwrap_or(0);
        let leaders: Vec<ActorId> = counts
            .iter()
            .filter(|(_, n)| **n == top)
            .map(|(id, _)| *id)
            .collect();

        let outcome = match leaders.as_slice() {
            [] => VoteOutcome::NoVotes,
            [single] => VoteOutcome::Eliminated(*single),
            _ => VoteOutcome::Tie(leaders),
        };

        Tally {
            counts: counts.into_iter().collect(),
            outcome,
        }
    }

    /// Credit every non-aggressor voter whose ballot named an aggressor.
    pub(crate) fn credit(roster: &mut Roster, ballots: &[(ActorId, ActorId)]) {
        for &(voter, target) in ballots {
            let voter_is_village = roster.role(voter).is_some_and(|r| !is_aggressive(r));
            let target_is_aggressor = roster.role(target).is_some_and(is_aggressive);
            if !(voter_is_village && target_is_aggressor) {
                continue;
            }
            if let Some(record) = roster.get_mut(voter) {
                record.stats_mut().correct_votes += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Role;

    fn id(n: u8) -> ActorId {
        ActorId::new(n)
    }

    #[test]
    fn test_plurality() {
        let tally = VoteResolver::tally([(id(1), id(2)), (id(3), id(2)), (id(2), id(4))]);
        assert_eq!(tally.outcome, VoteOutcome::Eliminated(id(2)));
        assert_eq!(tally.counts, vec![(id(2), 2), (id(4), 1)]);
    }

    #[test]
    fn test_two_two_split() {
        let tally = VoteResolver::tally([
            (id(1), id(2)),
            (id(2), id(1)),
            (id(3), id(1)),
            (id(4), id(2)),
        ]);
        assert_eq!(tally.outcome, VoteOutcome::Tie(vec![id(1), id(2)]));
    }

    #[test]
    fn test_no_votes() {
        let tally = VoteResolver::tally(Vec::<(ActorId, ActorId)>::new());
        assert_eq!(tally.outcome, VoteOutcome::NoVotes);
        assert!(tally.counts.is_empty());
    }

    #[test]
    fn test_credit_correct_votes() {
        let mut roster = Roster::from_assignment([
            (id(1), Role::Aggressor),
            (id(2), Role::Commoner),
            (id(3), Role::Medic),
        ])
        .unwrap();

        VoteResolver::credit(&mut roster, &[(id(2), id(1)), (id(3), id(2)), (id(1), id(2))]);

        assert_eq!(roster.get(id(2)).unwrap().stats().correct_votes, 1);
        assert_eq!(roster.get(id(3)).unwrap().stats().correct_votes, 0);
        assert_eq!(roster.get(id(1)).unwrap().stats().correct_votes, 0);
    }
}
