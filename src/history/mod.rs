//! Undo support.
//!
//! Before every move the session records a full snapshot of the level
//! ([`Level::snapshot`](crate::level::Level::snapshot)). Grids are persistent
//! vectors, so the data copy is O(1); the cost of a snapshot is one fresh
//! presenter handle per entity.

mod undo;

pub use undo::History;
