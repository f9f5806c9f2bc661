//! Play sessions.
//!
//! A [`Game`] wraps one [`Level`](crate::level::Level) with its undo history
//! and presenter, and turns player input into turns:
//!
//! - a move snapshots the level, runs [`Level::p_move`](crate::level::Level::p_move)
//!   and plays the move cue;
//! - an undo restores the last snapshot and plays the undo cue.
//!
//! Once a level is won, moves are ignored until an undo.

mod game;

pub use game::{Command, Game, Outcome};
