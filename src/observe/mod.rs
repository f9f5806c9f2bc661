//! Board observations for headless agents.
//!
//! [`PlaneEncoder`] turns a [`Level`](crate::level::Level) into stacked
//! binary planes, one per noun kind, one for text and one per rule, in the
//! `[channels, length, width]` layout convolutional policies expect.

mod encoded;
mod encoder;

pub use encoded::EncodedBoard;
pub use encoder::{rule_plane, BoardEncoder, PlaneEncoder, PLANE_COUNT, TEXT_PLANE};
