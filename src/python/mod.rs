//! Python bindings for the rule-blocks engine.
//!
//! # Quick Start
//!
//! ```python
//! import rule_blocks as rb
//!
//! game = rb.Game(level=0)
//! for _ in range(7):
//!     moved, won = game.step(rb.Direction("d"))
//!
//! assert game.won
//! planes = game.observation()  # shape (10, 20, 20)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_game;

pub use py_core::*;
pub use py_game::*;

/// rule-blocks: a sentence-rule push-block puzzle engine.
#[pymodule]
fn rule_blocks(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDirection>()?;
    m.add_class::<PyGame>()?;
    m.add("CLASSIC_LEVELS", crate::levels::CLASSIC_COUNT)?;
    Ok(())
}
