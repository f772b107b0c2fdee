//! Night resolution.
//!
//! Night decisions arrive in three steps and are applied in a fixed order:
//! kill consensus, inspection, then the Medic's remedy. Deaths are only
//! produced by [`NightResolver::finalize`], wolf first, then poison.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{faction_of, is_aggressive, ActorId};
use crate::roster::{DeathCause, Inspection, Resource, Roster};

/// Deaths produced by one night. Never more than two.
pub type NightDeaths = SmallVec<[(ActorId, DeathCause); 2]>;

/// What the Medic decided tonight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Remedy {
    /// Nothing used.
    #[default]
    Abstain,
    /// Antidote on the pending kill target.
    Save(ActorId),
    /// Poison on another actor.
    Poison(ActorId),
}

/// Per-night resolver state. Reset when a new night begins.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightResolver {
    pending_kill: Option<ActorId>,
    remedy: Option<(ActorId, Remedy)>,
}

impl NightResolver {
    /// Empty night.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse aggressor nominations into one target.
    ///
    /// The target with the most nominations wins; ties go to the lowest id.
    /// No nominations means no kill.
    ///
    /// ```
    /// use rust_deduction::core::ActorId;
    /// use rust_deduction::rules::NightResolver;
    ///
    /// let picks = [ActorId::new(7), ActorId::new(3)];
    /// assert_eq!(NightResolver::kill_consensus(picks), Some(ActorId::new(3)));
    /// ```
    #[must_use]
    pub fn kill_consensus(nominations: impl IntoIterator<Item = ActorId>) -> Option<ActorId> {
        let mut counts: FxHashMap<ActorId, u32> = FxHashMap::default();
        for target in nominations {
            *counts.entry(target).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then(b.cmp(a)))
            .map(|(target, _)| target)
    }

    /// Tonight's pending kill target, once the kill step has closed.
    #[must_use]
    pub fn pending_kill(&self) -> Option<ActorId> {
        self.pending_kill
    }

    /// The Medic's buffered decision, if any.
    #[must_use]
    pub fn remedy(&self) -> Option<(ActorId, Remedy)> {
        self.remedy
    }

    pub(crate) fn set_pending_kill(&mut self, target: Option<ActorId>) {
        self.pending_kill = target;
    }

    pub(crate) fn set_remedy(&mut self, medic: ActorId, remedy: Remedy) {
        self.remedy = Some((medic, remedy));
    }

    /// Record an inspection in the Inspector's kit.
    pub(crate) fn inspect(
        roster: &mut Roster,
        inspector: ActorId,
        target: ActorId,
        round: u32,
    ) -> Option<Inspection> {
        let faction = faction_of(roster.role(target)?);
        let check = Inspection {
            round,
            target,
            faction,
        };
        roster.get_mut(inspector)?.kit_mut().push_check(check);
        debug!(%inspector, %target, ?faction, "inspection recorded");
        Some(check)
    }

    /// Apply tonight's remedy and produce the deaths, wolf first.
    ///
    /// Consumes the Medic's resources and bumps the survival counter of
    /// every actor that lives through the night. Leaves the resolver empty.
    pub(crate) fn finalize(&mut self, roster: &mut Roster) -> NightDeaths {
        let mut kill = self.pending_kill.take();
        let mut poisoned = None;

        if let Some((medic, remedy)) = self.remedy.take() {
            match remedy {
                Remedy::Save(target) if kill == Some(target) => {
                    if Self::spend(roster, medic, Resource::Antidote) {
                        debug!(%medic, %target, "antidote cancels the kill");
                        kill = None;
                    }
                }
                Remedy::Poison(target) => {
                    if Self::spend(roster, medic, Resource::Poison) {
                        poisoned = Some(target);
                        if roster.role(target).is_some_and(|r| !is_aggressive(r)) {
                            if let Some(record) = roster.get_mut(medic) {
                                record.stats_mut().mistakes += 1;
                            }
                        }
                    }
                }
                Remedy::Save(_) | Remedy::Abstain => {}
            }
        }

        let mut deaths = NightDeaths::new();
        if let Some(target) = kill.filter(|t| roster.is_alive(*t)) {
            deaths.push((target, DeathCause::Wolf));
        }
        if let Some(target) = poisoned.filter(|t| roster.is_alive(*t)) {
            deaths.push((target, DeathCause::Poison));
        }

        for id in roster.alive_ids() {
            if deaths.iter().any(|(d, _)| *d == id) {
                continue;
            }
            if let Some(record) = roster.get_mut(id) {
                record.stats_mut().nights_survived += 1;
            }
        }

        deaths
    }

    fn spend(roster: &mut Roster, medic: ActorId, resource: Resource) -> bool {
        roster
            .get_mut(medic)
            .is_some_and(|record| record.kit_mut().spend(resource))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Faction, Role};

    fn roster() -> Roster {
        Roster::from_assignment([
            (ActorId::new(1), Role::Aggressor),
            (ActorId::new(2), Role::Inspector),
            (ActorId::new(3), Role::Medic),
            (ActorId::new(4), Role::Commoner),
            (ActorId::new(5), Role::Marksman),
            (ActorId::new(6), Role::Commoner),
        ])
        .unwrap()
    }

    fn id(n: u8) -> ActorId {
        ActorId::new(n)
    }

    #[test]
    fn test_kill_consensus() {
        assert_eq!(NightResolver::kill_consensus(std::iter::empty()), None);
        assert_eq!(NightResolver::kill_consensus([id(4)]), Some(id(4)));
        assert_eq!(NightResolver::kill_consensus([id(3), id(7)]), Some(id(3)));
        assert_eq!(NightResolver::kill_consensus([id(7), id(3)]), Some(id(3)));
        assert_eq!(NightResolver::kill_consensus([id(7), id(3), id(7)]), Some(id(7)));
    }

    #[test]
    fn test_save_cancels_kill() {
        let mut roster = roster();
        let mut night = NightResolver::new();
        night.set_pending_kill(Some(id(4)));
        night.set_remedy(id(3), Remedy::Save(id(4)));

        let deaths = night.finalize(&mut roster);
        assert!(deaths.is_empty());

        let medic = roster.get(id(3)).unwrap();
        assert!(!medic.antidote_available());
        assert!(medic.poison_available());
        assert_eq!(night.pending_kill(), None);
    }

    #[test]
    fn test_wolf_then_poison() {
        let mut roster = roster();
        let mut night = NightResolver::new();
        night.set_pending_kill(Some(id(4)));
        night.set_remedy(id(3), Remedy::Poison(id(1)));

        let deaths = night.finalize(&mut roster);
        assert_eq!(deaths.as_slice(), &[(id(4), DeathCause::Wolf), (id(1), DeathCause::Poison)]);

        let medic = roster.get(id(3)).unwrap();
        assert!(!medic.poison_available());
        assert_eq!(medic.stats().mistakes, 0);
    }

    #[test]
    fn test_poisoning_villager_counts_mistake() {
        let mut roster = roster();
        let mut night = NightResolver::new();
        night.set_remedy(id(3), Remedy::Poison(id(6)));

        let deaths = night.finalize(&mut roster);
        assert_eq!(deaths.as_slice(), &[(id(6), DeathCause::Poison)]);
        assert_eq!(roster.get(id(3)).unwrap().stats().mistakes, 1);
    }

    #[test]
    fn test_survival_counter() {
        let mut roster = roster();
        let mut night = NightResolver::new();
        night.set_pending_kill(Some(id(6)));

        night.finalize(&mut roster);
        assert_eq!(roster.get(id(1)).unwrap().stats().nights_survived, 1);
        assert_eq!(roster.get(id(6)).unwrap().stats().nights_survived, 0);
    }

    #[test]
    fn test_inspect_appends() {
        let mut roster = roster();
        let check = NightResolver::inspect(&mut roster, id(2), id(1), 1).unwrap();
        assert_eq!(check.faction, Faction::Aggressor);

        NightResolver::inspect(&mut roster, id(2), id(4), 2);
        let checks = roster.get(id(2)).unwrap().kit().checks();
        assert_eq!(checks.len(), 2);
        assert_eq!(checks[1].faction, Faction::Commoner);
    }
}
