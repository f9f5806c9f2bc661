//! Levels: the static [`Layout`] descriptor and the playable [`Level`].
//!
//! ## Turn flow
//!
//! [`Level::p_move`] runs one turn:
//!
//! 1. Collect the `You` pieces.
//! 2. Try to move each one (see [`movement`](crate::movement)).
//! 3. Replay the resulting model moves to the presenter.
//! 4. Re-derive the rule set from scratch (see [`rules`](crate::rules)).
//! 5. Check whether a `You` piece stands on a `Win` piece.
//!
//! Snapshotting for undo is the caller's job, before step 1.

mod layout;
mod state;

pub use layout::{Layout, Placement, PlacementKind};
pub use state::{Level, TurnOutcome};
