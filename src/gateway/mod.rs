//! Inbound submission handling.
//!
//! ## Key Components
//!
//! - [`ActionGateway`]: Ordered validation of a submission against the
//!   open sub-phase, the actor's role and resources, and the target
//! - [`DecisionBuffer`]: Accepted decisions for the open sub-phase, last
//!   write per actor wins

mod buffer;
#[allow(clippy::module_inception)]
mod gateway;

pub use buffer::DecisionBuffer;
pub use gateway::ActionGateway;
