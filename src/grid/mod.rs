//! The board: entity arena plus per-cell ordered stacks.
//!
//! The `Grid` is the only place that changes an entity's position or stack
//! slot. It keeps the dense-index invariant: after any `push` or `remove`,
//! the entities of every cell have stack slots exactly `0..n` in stack
//! order.
//!
//! Both the arena and the cells are `im` persistent vectors, so cloning a
//! whole grid is O(1). Movement relies on that to checkpoint before a push
//! and the undo history relies on it to snapshot levels.

mod board;

pub use board::{Grid, Restacked, Stack};
