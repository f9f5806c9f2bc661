//! Core type bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::Direction;

/// Python wrapper for Direction.
#[pyclass(name = "Direction")]
#[derive(Clone, Copy, Debug)]
pub struct PyDirection(pub Direction);

#[pymethods]
impl PyDirection {
    /// Create a direction from a `WASD` key.
    #[new]
    fn new(key: char) -> PyResult<Self> {
        Direction::from_key(key)
            .map(Self)
            .ok_or_else(|| PyValueError::new_err(format!("no direction bound to key '{}'", key)))
    }

    /// `+x`
    #[staticmethod]
    fn pos_x() -> Self {
        Self(Direction::PosX)
    }

    /// `-x`
    #[staticmethod]
    fn neg_x() -> Self {
        Self(Direction::NegX)
    }

    /// `+z`
    #[staticmethod]
    fn pos_z() -> Self {
        Self(Direction::PosZ)
    }

    /// `-z`
    #[staticmethod]
    fn neg_z() -> Self {
        Self(Direction::NegZ)
    }

    /// Action index (position in `Direction.all()`).
    fn index(&self) -> usize {
        Direction::ALL
            .iter()
            .position(|&d| d == self.0)
            .unwrap_or_default()
    }

    /// All four directions, in action-index order.
    #[staticmethod]
    fn all() -> Vec<Self> {
        Direction::ALL.into_iter().map(Self).collect()
    }

    /// Unit offset `(dx, dz)`.
    #[getter]
    fn delta(&self) -> (isize, isize) {
        self.0.delta()
    }

    fn __repr__(&self) -> String {
        format!("Direction({})", self.0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        self.index() as u64
    }
}
