//! Python bindings for the rust-deduction rules engine.
//!
//! This module lets Python agent code drive a game directly.
//!
//! # Quick Start
//!
//! ```python
//! import rust_deduction as rd
//!
//! game = rd.Game.classic(seed=7)
//! print(game.phase, game.awaiting())
//!
//! # Submissions raise ValueError when rejected
//! game.submit_kill(1, 4)
//!
//! # Each seat only sees what it may know
//! for line in game.log(4):
//!     print(line)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_game;

pub use py_core::*;
pub use py_game::*;

/// rust-deduction: rules engine for a social-deduction game.
#[pymodule]
fn rust_deduction(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyActorId>()?;
    m.add_class::<PyGame>()?;
    Ok(())
}
