//! Roster: seats, roles, life status, and role-scoped resources.
//!
//! ## Key Components
//!
//! - [`Roster`]: All seats; alive/dead sets and faction populations are
//!   derived from it on demand
//! - [`ActorRecord`]: One seat's role, kit, status, and counters
//! - [`RoleKit`]: Role-scoped one-shot charges and Inspector history
//! - [`RoleSet`]: Roles to deal at setup
//! - [`RosterBuilder`]: Seeded deal of a role set
//!
//! Mutation is crate-private: only the resolvers and the death queue change
//! a roster once it is built.

mod kit;
mod record;
#[allow(clippy::module_inception)]
mod roster;

pub use kit::{Charge, Inspection, Resource, RoleKit};
pub use record::{ActorRecord, DeathCause, LifeStatus, Stats};
pub use roster::{RoleSet, Roster, RosterBuilder};
