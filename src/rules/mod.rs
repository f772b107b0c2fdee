//! Resolution rules.
//!
//! Resolvers turn buffered decisions into deaths and knowledge; the death
//! queue applies deaths one at a time and asks the win evaluator after each.
//!
//! ## Key Components
//!
//! - [`NightResolver`]: Kill consensus, inspection, remedy, and night deaths
//! - [`VoteResolver`]: Ballot tally and correct-vote credit
//! - [`DeathQueue`]: FIFO death application with retaliation suspension
//! - [`WinEvaluator`]: Population-based win conditions

mod deaths;
mod night;
mod vote;
mod win;

pub use deaths::{DeathQueue, Drain};
pub use night::{NightDeaths, NightResolver, Remedy};
pub use vote::{Tally, VoteOutcome, VoteResolver};
pub use win::{GameResult, WinEvaluator};
