//! Core type bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{ActorId, GameError};

/// Python wrapper for ActorId.
#[pyclass(name = "ActorId")]
#[derive(Clone, Debug)]
pub struct PyActorId(pub ActorId);

#[pymethods]
impl PyActorId {
    /// Create a new actor ID (1-based seat number).
    #[new]
    fn new(id: u8) -> Self {
        Self(ActorId::new(id))
    }

    /// Get the raw seat number.
    #[getter]
    fn id(&self) -> u8 {
        self.0 .0
    }

    fn __repr__(&self) -> String {
        format!("ActorId({})", self.0 .0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        self.0 .0 as u64
    }
}

/// Engine rejections surface in Python as `ValueError`.
pub(crate) fn to_py_err(err: GameError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
