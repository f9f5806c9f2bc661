//! Session bindings for Python.

use numpy::PyArray3;
use numpy::PyArrayMethods;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{Direction, EngineConfig};
use crate::error::EngineError;
use crate::level::Layout;
use crate::levels;
use crate::observe::{BoardEncoder, PlaneEncoder};
use crate::session::Game;
use crate::visual::Headless;

use super::py_core::PyDirection;

fn to_py_err(err: EngineError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Headless play session.
#[pyclass(name = "Game")]
pub struct PyGame {
    inner: Game<Headless>,
}

#[pymethods]
impl PyGame {
    /// Start a classic level (0-based index).
    #[new]
    #[pyo3(signature = (level = 0, history_cap = 200))]
    fn new(level: usize, history_cap: usize) -> PyResult<Self> {
        let layout = levels::classic(level)
            .ok_or_else(|| PyValueError::new_err(format!("no classic level {}", level)))?;
        Self::start(&layout, history_cap)
    }

    /// Start a level from a JSON layout.
    #[staticmethod]
    #[pyo3(signature = (json, history_cap = 200))]
    fn from_json(json: &str, history_cap: usize) -> PyResult<Self> {
        let layout = Layout::from_json(json).map_err(to_py_err)?;
        Self::start(&layout, history_cap)
    }

    /// Play one turn. Returns `(moved, won)`, or `None` once the level is won.
    fn step(&mut self, direction: PyDirection) -> Option<(bool, bool)> {
        self.inner
            .step(direction.0)
            .map(|turn| (turn.any_moved(), turn.won))
    }

    /// Play one turn by action index (see `Direction.all()`).
    fn step_index(&mut self, action: usize) -> PyResult<Option<(bool, bool)>> {
        let dir = Direction::ALL
            .get(action)
            .copied()
            .ok_or_else(|| PyValueError::new_err(format!("action {} out of range", action)))?;
        Ok(self.step(PyDirection(dir)))
    }

    /// Undo the last turn. Returns false if there was nothing to undo.
    fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    /// Check if the level has been completed.
    #[getter]
    fn won(&self) -> bool {
        self.inner.is_won()
    }

    /// Turns played, minus turns undone.
    #[getter]
    fn turns(&self) -> u32 {
        self.inner.turns()
    }

    /// Current rules as the rule panel text.
    fn rules_text(&self) -> String {
        self.inner.level().rules().to_string()
    }

    /// `(x, z)` of every `You` piece.
    fn you_positions(&self) -> Vec<(usize, usize)> {
        let level = self.inner.level();
        level
            .you_entities()
            .map(|id| {
                let pos = level.entity(id).pos;
                (pos.x, pos.z)
            })
            .collect()
    }

    /// Board planes as a `[planes, length, width]` float array.
    fn observation<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let encoded = PlaneEncoder::new().encode(self.inner.level());
        let [planes, length, width] = encoded.shape[..] else {
            return Err(PyValueError::new_err("unexpected observation shape"));
        };
        numpy::PyArray1::from_vec_bound(py, encoded.tensor)
            .reshape([planes, length, width])
            .map_err(|e| PyValueError::new_err(format!("{}", e)))
    }

    fn __repr__(&self) -> String {
        let grid = self.inner.level().grid();
        format!(
            "Game({}x{}, turns={}, won={})",
            grid.length(),
            grid.width(),
            self.inner.turns(),
            self.inner.is_won()
        )
    }
}

impl PyGame {
    fn start(layout: &Layout, history_cap: usize) -> PyResult<Self> {
        let config = EngineConfig::default()
            .with_history_cap(history_cap)
            .with_cues(false);
        let inner = Game::new(layout, Headless::new(), config).map_err(to_py_err)?;
        Ok(Self { inner })
    }
}
