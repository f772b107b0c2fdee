//! The roster: every seat, its role, and its state.
//!
//! Built once at setup, then mutated only by death and resource events
//! raised from the resolvers. Alive and dead sets are derived from each
//! record's [`LifeStatus`], so they always partition the table.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::core::{is_aggressive, ActorId, ActorMap, GameRng, Population, Role, SetupError};

use super::record::{ActorRecord, DeathCause, LifeStatus};

/// A multiset of roles to deal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    /// Roles to deal, in any order.
    #[must_use]
    pub fn new(roles: Vec<Role>) -> Self {
        Self(roles)
    }

    /// The standard nine-seat table: three aggressors, three commoners,
    /// Inspector, Medic, Marksman.
    #[must_use]
    pub fn classic_nine() -> Self {
        Self(vec![
            Role::Aggressor,
            Role::Aggressor,
            Role::Aggressor,
            Role::Commoner,
            Role::Commoner,
            Role::Commoner,
            Role::Inspector,
            Role::Medic,
            Role::Marksman,
        ])
    }

    /// A six-seat table: two aggressors, one commoner, and all three
    /// specialists.
    #[must_use]
    pub fn classic_six() -> Self {
        Self(vec![
            Role::Aggressor,
            Role::Aggressor,
            Role::Commoner,
            Role::Inspector,
            Role::Medic,
            Role::Marksman,
        ])
    }

    /// Number of seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no roles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The roles.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.0
    }
}

/// Deals a [`RoleSet`] from a seed.
///
/// ```
/// use rust_deduction::roster::{RoleSet, RosterBuilder};
///
/// let a = RosterBuilder::new(RoleSet::classic_nine()).with_seed(3).build().unwrap();
/// let b = RosterBuilder::new(RoleSet::classic_nine()).with_seed(3).build().unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterBuilder {
    roles: RoleSet,
    seed: u64,
}

impl RosterBuilder {
    /// Start from a role set with seed 0.
    #[must_use]
    pub fn new(roles: RoleSet) -> Self {
        Self { roles, seed: 0 }
    }

    /// Builder: set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Add one more seat with `role`.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.0.push(role);
        self
    }

    /// Deal the roles.
    pub fn build(&self) -> Result<Roster, SetupError> {
        Roster::deal(&self.roles, &mut GameRng::new(self.seed))
    }
}

/// All seats at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    actors: ActorMap<ActorRecord>,
}

impl Roster {
    /// Build a roster from an explicit seat assignment.
    ///
    /// Seats must cover `1..=n` exactly once.
    pub fn from_assignment(
        assignment: impl IntoIterator<Item = (ActorId, Role)>,
    ) -> Result<Self, SetupError> {
        let assignment: Vec<(ActorId, Role)> = assignment.into_iter().collect();
        let count = assignment.len();
        Self::check_shape(assignment.iter().map(|(_, r)| *r), count)?;

        let mut slots: ActorMap<Option<Role>> = ActorMap::with_default(count);
        for (id, role) in assignment {
            match slots.get_mut(id) {
                None => return Err(SetupError::SeatOutOfRange(id, count)),
                Some(Some(_)) => return Err(SetupError::DuplicateActor(id)),
                Some(slot) => *slot = Some(role),
            }
        }

        let mut actors = Vec::with_capacity(count);
        for (id, role) in slots.iter() {
            let role = role.ok_or(SetupError::SeatOutOfRange(id, count))?;
            actors.push(ActorRecord::new(id, role));
        }

        Ok(Self {
            actors: ActorMap::from_vec(actors),
        })
    }

    /// Deal `roles` across seats `1..=n` with a deterministic shuffle.
    pub fn deal(roles: &RoleSet, rng: &mut GameRng) -> Result<Self, SetupError> {
        let mut shuffled = roles.roles().to_vec();
        rng.shuffle(&mut shuffled);
        Self::from_assignment(ActorId::all(shuffled.len()).zip(shuffled))
    }

    fn check_shape(roles: impl Iterator<Item = Role> + Clone, count: usize) -> Result<(), SetupError> {
        if count == 0 {
            return Err(SetupError::Empty);
        }
        if count > 255 {
            return Err(SetupError::TooManyActors(count));
        }
        if !roles.clone().any(is_aggressive) {
            return Err(SetupError::NoAggressor);
        }
        if roles.clone().all(is_aggressive) {
            return Err(SetupError::NoVillage);
        }
        Ok(())
    }

    /// Number of seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.actor_count()
    }

    /// Whether the roster has no seats. Never true for a built roster.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a seat.
    #[must_use]
    pub fn get(&self, id: ActorId) -> Option<&ActorRecord> {
        self.actors.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: ActorId) -> Option<&mut ActorRecord> {
        self.actors.get_mut(id)
    }

    /// The role dealt to a seat.
    #[must_use]
    pub fn role(&self, id: ActorId) -> Option<Role> {
        self.get(id).map(|a| a.role)
    }

    /// Whether a seat exists and is alive.
    #[must_use]
    pub fn is_alive(&self, id: ActorId) -> bool {
        self.get(id).is_some_and(ActorRecord::is_alive)
    }

    /// Iterate over all records in seat order.
    pub fn iter(&self) -> impl Iterator<Item = &ActorRecord> {
        self.actors.iter().map(|(_, a)| a)
    }

    /// Alive records in seat order.
    pub fn alive(&self) -> impl Iterator<Item = &ActorRecord> {
        self.iter().filter(|a| a.is_alive())
    }

    /// Alive seat ids in seat order.
    #[must_use]
    pub fn alive_ids(&self) -> Vec<ActorId> {
        self.alive().map(|a| a.id).collect()
    }

    /// Alive-set as a persistent ordered set.
    #[must_use]
    pub fn alive_set(&self) -> OrdSet<ActorId> {
        self.alive().map(|a| a.id).collect()
    }

    /// Dead-set with causes, in seat order.
    #[must_use]
    pub fn dead(&self) -> Vec<(ActorId, DeathCause)> {
        self.iter()
            .filter_map(|a| match a.status() {
                LifeStatus::Dead { cause, .. } => Some((a.id, cause)),
                LifeStatus::Alive => None,
            })
            .collect()
    }

    /// Alive seats holding `role`, in seat order.
    pub fn alive_with_role(&self, role: Role) -> impl Iterator<Item = &ActorRecord> {
        self.alive().filter(move |a| a.role == role)
    }

    /// Seats (alive or dead) holding `role`, in seat order.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &ActorRecord> {
        self.iter().filter(move |a| a.role == role)
    }

    /// Alive population per faction, recomputed from the records.
    #[must_use]
    pub fn population(&self) -> Population {
        self.alive().map(|a| a.role).collect()
    }

    /// Population at setup, counting the dead as alive.
    #[must_use]
    pub fn dealt_population(&self) -> Population {
        self.iter().map(|a| a.role).collect()
    }
}
