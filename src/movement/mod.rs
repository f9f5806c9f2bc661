//! Movement resolution: `You` pieces step, pushing whatever is in the way.
//!
//! A [`Resolver`] is built per turn for one direction. It mutates the grid
//! directly and records the presenter updates a move implies in a journal
//! of [`MoveEvent`]s; [`replay`] hands that journal to a presenter once the
//! turn is resolved.

mod resolver;

pub use resolver::{replay, MoveEvent, Resolver};
