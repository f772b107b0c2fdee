//! Game bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{ActorId, EngineConfig, Role};
use crate::engine::{Accepted, Game};
use crate::roster::RoleSet;

use super::py_core::{to_py_err, PyActorId};

/// Python wrapper for Game.
///
/// Every `submit_*` returns whether the submission closed the open
/// sub-phase. Rejections raise `ValueError` and change nothing.
#[pyclass(name = "Game")]
pub struct PyGame {
    inner: Game,
}

fn closed(result: Result<Accepted, crate::core::GameError>) -> PyResult<bool> {
    result.map(|a| a.phase_closed).map_err(to_py_err)
}

#[pymethods]
impl PyGame {
    /// Create a new game.
    ///
    /// # Arguments
    /// - roles: Role names to deal, e.g. `["Aggressor", "Commoner", "Medic"]`
    /// - seed: Seed for the deal
    /// - allow_self_save: Whether the Medic may save themselves
    /// - disclose_causes: Whether death announcements name the cause
    #[new]
    #[pyo3(signature = (roles, seed = 42, allow_self_save = false, disclose_causes = false))]
    fn new(
        roles: Vec<String>,
        seed: u64,
        allow_self_save: bool,
        disclose_causes: bool,
    ) -> PyResult<Self> {
        let roles = roles
            .iter()
            .map(|name| {
                Role::from_name(name)
                    .ok_or_else(|| PyValueError::new_err(format!("unknown role: {}", name)))
            })
            .collect::<PyResult<Vec<_>>>()?;
        let config = EngineConfig::default()
            .with_seed(seed)
            .with_self_save(allow_self_save)
            .with_disclosed_causes(disclose_causes)
            .with_phase_timeout(None);
        let inner = Game::deal(config, &RoleSet::new(roles))
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// The standard nine-seat table.
    #[staticmethod]
    #[pyo3(signature = (seed = 42))]
    fn classic(seed: u64) -> PyResult<Self> {
        let config = EngineConfig::default().with_seed(seed).with_phase_timeout(None);
        let inner = Game::deal(config, &RoleSet::classic_nine())
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    fn submit_speech(&mut self, actor: u8, text: String) -> PyResult<bool> {
        closed(self.inner.submit_speech(ActorId::new(actor), text))
    }

    fn submit_vote(&mut self, actor: u8, target: u8) -> PyResult<bool> {
        closed(self.inner.submit_vote(ActorId::new(actor), ActorId::new(target)))
    }

    fn submit_kill(&mut self, actor: u8, target: u8) -> PyResult<bool> {
        closed(self.inner.submit_kill(ActorId::new(actor), ActorId::new(target)))
    }

    fn submit_save(&mut self, actor: u8, target: u8) -> PyResult<bool> {
        closed(self.inner.submit_save(ActorId::new(actor), ActorId::new(target)))
    }

    fn submit_poison(&mut self, actor: u8, target: u8) -> PyResult<bool> {
        closed(self.inner.submit_poison(ActorId::new(actor), ActorId::new(target)))
    }

    fn submit_inspect(&mut self, actor: u8, target: u8) -> PyResult<bool> {
        closed(self.inner.submit_inspect(ActorId::new(actor), ActorId::new(target)))
    }

    /// Retaliate on `target`, or hold fire with `None`.
    #[pyo3(signature = (actor, target = None))]
    fn submit_retaliate(&mut self, actor: u8, target: Option<u8>) -> PyResult<bool> {
        closed(
            self.inner
                .submit_retaliate(ActorId::new(actor), target.map(ActorId::new)),
        )
    }

    fn submit_abstain(&mut self, actor: u8) -> PyResult<bool> {
        closed(self.inner.submit_abstain(ActorId::new(actor)))
    }

    /// Close the open sub-phase; missing actors abstain.
    ///
    /// Returns the name of the sub-phase open afterwards.
    fn expire(&mut self) -> PyResult<String> {
        self.inner
            .expire()
            .map(|phase| phase.to_string())
            .map_err(to_py_err)
    }

    /// Name of the open sub-phase.
    #[getter]
    fn phase(&self) -> String {
        self.inner.phase().to_string()
    }

    /// Current round.
    #[getter]
    fn round(&self) -> u32 {
        self.inner.round()
    }

    /// Alive seats.
    fn alive(&self) -> Vec<PyActorId> {
        self.inner
            .roster()
            .alive_ids()
            .into_iter()
            .map(PyActorId)
            .collect()
    }

    /// Seats the open sub-phase is still waiting for.
    fn awaiting(&self) -> Vec<u8> {
        self.inner.awaiting().into_iter().map(|a| a.0).collect()
    }

    /// Role name of a seat. Meant for the host, not for agents.
    fn role(&self, actor: u8) -> PyResult<String> {
        self.inner
            .roster()
            .role(ActorId::new(actor))
            .map(|r| r.name().to_string())
            .ok_or_else(|| PyValueError::new_err(format!("no seat {}", actor)))
    }

    /// The log entries a seat may read, rendered as text.
    fn log(&self, actor: u8) -> PyResult<Vec<String>> {
        let entries = self
            .inner
            .get_broadcast_log(ActorId::new(actor))
            .map_err(to_py_err)?;
        Ok(entries.iter().map(ToString::to_string).collect())
    }

    /// Winning side, once the game is over.
    #[getter]
    fn winner(&self) -> Option<String> {
        self.inner.result().map(|r| r.winner.to_string())
    }

    fn __repr__(&self) -> String {
        format!(
            "Game(round={}, phase={}, alive={})",
            self.inner.round(),
            self.inner.phase(),
            self.inner.roster().alive_ids().len()
        )
    }
}
