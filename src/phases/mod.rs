//! Phase scheduling.
//!
//! - [`PhaseScheduler`]: Which sub-phase is open, whose input it waits for,
//!   and what opens next

mod scheduler;

pub use scheduler::PhaseScheduler;
