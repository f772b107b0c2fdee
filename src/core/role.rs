//! Roles and faction membership.
//!
//! Roles form a closed set. Faction and side membership are computed by free
//! functions so resolver code can match exhaustively on `Role` without a
//! hierarchy of predicates.

use serde::{Deserialize, Serialize};

/// A secret role dealt to one actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// No night ability; votes by day.
    Commoner,
    /// Member of the aggressive faction; jointly picks a kill each night.
    Aggressor,
    /// Learns one actor's faction each night.
    Inspector,
    /// Holds one antidote and one poison for the whole game.
    Medic,
    /// May retaliate once on death, unless poisoned.
    Marksman,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 5] = [
        Role::Commoner,
        Role::Aggressor,
        Role::Inspector,
        Role::Medic,
        Role::Marksman,
    ];

    /// Human-readable role name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Commoner => "Commoner",
            Role::Aggressor => "Aggressor",
            Role::Inspector => "Inspector",
            Role::Medic => "Medic",
            Role::Marksman => "Marksman",
        }
    }

    /// Parse a role from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Population bucket used for win evaluation and inspection results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// The aggressive faction.
    Aggressor,
    /// Good-side roles with a night or death ability.
    Specialist,
    /// Good-side roles without abilities.
    Commoner,
}

/// Which side wins together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The aggressive faction.
    Aggressors,
    /// Every non-aggressive faction.
    Village,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Aggressors => f.write_str("Aggressors"),
            Side::Village => f.write_str("Village"),
        }
    }
}

/// The faction a role counts toward.
#[must_use]
pub const fn faction_of(role: Role) -> Faction {
    match role {
        Role::Aggressor => Faction::Aggressor,
        Role::Inspector | Role::Medic | Role::Marksman => Faction::Specialist,
        Role::Commoner => Faction::Commoner,
    }
}

/// The side a role wins with.
#[must_use]
pub const fn side_of(role: Role) -> Side {
    match faction_of(role) {
        Faction::Aggressor => Side::Aggressors,
        Faction::Specialist | Faction::Commoner => Side::Village,
    }
}

/// Whether a role belongs to the aggressive faction.
#[must_use]
pub const fn is_aggressive(role: Role) -> bool {
    matches!(faction_of(role), Faction::Aggressor)
}

/// Alive population per faction.
///
/// Always recomputed from the roster; never stored or adjusted in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    /// Alive aggressors.
    pub aggressors: usize,
    /// Alive specialists.
    pub specialists: usize,
    /// Alive commoners.
    pub commoners: usize,
}

impl Population {
    /// Count one alive actor of the given role.
    pub fn add(&mut self, role: Role) {
        match faction_of(role) {
            Faction::Aggressor => self.aggressors += 1,
            Faction::Specialist => self.specialists += 1,
            Faction::Commoner => self.commoners += 1,
        }
    }

    /// Alive actors on the village side.
    #[must_use]
    pub const fn village(&self) -> usize {
        self.specialists + self.commoners
    }

    /// Total alive actors.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.aggressors + self.village()
    }
}

impl FromIterator<Role> for Population {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut population = Population::default();
        for role in iter {
            population.add(role);
        }
        population
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factions() {
        assert_eq!(faction_of(Role::Aggressor), Faction::Aggressor);
        assert_eq!(faction_of(Role::Medic), Faction::Specialist);
        assert_eq!(faction_of(Role::Commoner), Faction::Commoner);

        assert_eq!(side_of(Role::Marksman), Side::Village);
        assert!(is_aggressive(Role::Aggressor));
        assert!(!is_aggressive(Role::Inspector));
    }

    #[test]
    fn test_role_names() {
        for role in Role::ALL {
            assert_eq!(Role::from_name(role.name()), Some(role));
        }
        assert_eq!(Role::from_name("medic"), Some(Role::Medic));
        assert_eq!(Role::from_name("werewolf"), None);
    }

    #[test]
    fn test_population() {
        let population: Population = [
            Role::Aggressor,
            Role::Aggressor,
            Role::Medic,
            Role::Commoner,
        ]
        .into_iter()
        .collect();

        assert_eq!(population.aggressors, 2);
        assert_eq!(population.specialists, 1);
        assert_eq!(population.commoners, 1);
        assert_eq!(population.village(), 2);
        assert_eq!(population.total(), 4);
    }
}
