//! The engine facade.
//!
//! ## Key Components
//!
//! - [`Game`]: Owns the state; the only entry point for submissions,
//!   expiry, views, and snapshots
//! - [`ActorView`]: What one actor may know
//! - [`Accepted`]: Receipt for an accepted submission

mod game;
mod view;

pub use game::{Accepted, Game};
pub use view::{ActorView, DeathNotice, PrivateKnowledge};
