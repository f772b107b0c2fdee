//! Actor identification and per-actor data storage.
//!
//! ## ActorId
//!
//! Type-safe seat identifier supporting 1-255 actors. Ids are 1-based so they
//! match the seat numbers players see at the table.
//!
//! ## ActorMap
//!
//! Efficient per-actor data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `ActorId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier supporting 1-255 actors.
///
/// Ids are 1-based: the first seat is `ActorId(1)`. `ActorId(0)` is never
/// dealt a role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u8);

impl ActorId {
    /// Create a new actor ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the 0-based storage index for this seat.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 as usize).wrapping_sub(1)
    }

    /// Iterate over all actor IDs for a table with `actor_count` seats.
    ///
    /// ```
    /// use rust_deduction::core::ActorId;
    ///
    /// let actors: Vec<_> = ActorId::all(4).collect();
    /// assert_eq!(actors.len(), 4);
    /// assert_eq!(actors[0], ActorId::new(1));
    /// assert_eq!(actors[3], ActorId::new(4));
    /// ```
    pub fn all(actor_count: usize) -> impl Iterator<Item = ActorId> {
        (1..=actor_count as u8).map(ActorId)
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Actor {}", self.0)
    }
}

/// Per-actor data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per seat.
///
/// ## Example
///
/// ```
/// use rust_deduction::core::{ActorId, ActorMap};
///
/// let mut spoken: ActorMap<bool> = ActorMap::with_value(4, false);
/// spoken[ActorId::new(2)] = true;
///
/// assert!(spoken[ActorId::new(2)]);
/// assert!(!spoken[ActorId::new(1)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorMap<T> {
    data: Vec<T>,
}

impl<T> ActorMap<T> {
    /// Create a new ActorMap with values from a factory function.
    pub fn new(actor_count: usize, factory: impl Fn(ActorId) -> T) -> Self {
        assert!(actor_count <= 255, "At most 255 actors supported");

        let data = ActorId::all(actor_count).map(factory).collect();
        Self { data }
    }

    /// Wrap a vector whose entry `i` belongs to seat `i + 1`.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(data.len() <= 255, "At most 255 actors supported");
        Self { data }
    }

    /// Create a new ActorMap with all entries set to the same value.
    pub fn with_value(actor_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(actor_count, |_| value.clone())
    }

    /// Create a new ActorMap with default values.
    pub fn with_default(actor_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(actor_count, |_| T::default())
    }

    /// Get the number of seats.
    #[must_use]
    pub fn actor_count(&self) -> usize {
        self.data.len()
    }

    /// Check whether `actor` names a seat in this map.
    #[must_use]
    pub fn contains(&self, actor: ActorId) -> bool {
        actor.0 >= 1 && actor.index() < self.data.len()
    }

    /// Get a reference to an actor's data, if the seat exists.
    #[must_use]
    pub fn get(&self, actor: ActorId) -> Option<&T> {
        if self.contains(actor) {
            self.data.get(actor.index())
        } else {
            None
        }
    }

    /// Get a mutable reference to an actor's data, if the seat exists.
    pub fn get_mut(&mut self, actor: ActorId) -> Option<&mut T> {
        if self.contains(actor) {
            self.data.get_mut(actor.index())
        } else {
            None
        }
    }

    /// Iterate over (ActorId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (ActorId(i as u8 + 1), v))
    }

    /// Iterate over (ActorId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ActorId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (ActorId(i as u8 + 1), v))
    }

    /// Iterate over all actor IDs.
    pub fn actor_ids(&self) -> impl Iterator<Item = ActorId> {
        ActorId::all(self.data.len())
    }
}

impl<T> Index<ActorId> for ActorMap<T> {
    type Output = T;

    fn index(&self, actor: ActorId) -> &Self::Output {
        &self.data[actor.index()]
    }
}

impl<T> IndexMut<ActorId> for ActorMap<T> {
    fn index_mut(&mut self, actor: ActorId) -> &mut Self::Output {
        &mut self.data[actor.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_id_basics() {
        let a1 = ActorId::new(1);
        let a2 = ActorId::new(2);

        assert_eq!(a1.index(), 0);
        assert_eq!(a2.index(), 1);
        assert_eq!(format!("{}", a1), "Actor 1");
        assert!(a1 < a2);
    }

    #[test]
    fn test_actor_map_new() {
        let map: ActorMap<u32> = ActorMap::new(3, |a| a.0 as u32 * 10);

        assert_eq!(map[ActorId::new(1)], 10);
        assert_eq!(map[ActorId::new(2)], 20);
        assert_eq!(map[ActorId::new(3)], 30);
        assert_eq!(map.actor_count(), 3);
    }

    #[test]
    fn test_actor_map_bounds() {
        let map: ActorMap<u8> = ActorMap::with_default(3);

        assert!(map.get(ActorId::new(0)).is_none());
        assert!(map.get(ActorId::new(3)).is_some());
        assert!(map.get(ActorId::new(4)).is_none());
        assert!(!map.contains(ActorId::new(0)));
    }

    #[test]
    fn test_actor_map_iter() {
        let mut map: ActorMap<u32> = ActorMap::with_value(4, 1);
        for (actor, value) in map.iter_mut() {
            *value += actor.0 as u32;
        }

        let collected: Vec<_> = map.iter().map(|(a, v)| (a.0, *v)).collect();
        assert_eq!(collected, vec![(1, 2), (2, 3), (3, 4), (4, 5)]);
    }

    #[test]
    fn test_actor_ids_match_seats() {
        let map: ActorMap<bool> = ActorMap::with_default(3);
        let ids: Vec<ActorId> = map.actor_ids().collect();

        assert_eq!(ids, vec![ActorId::new(1), ActorId::new(2), ActorId::new(3)]);
        assert!(ids.iter().all(|a| map.contains(*a)));
    }
}
