//! # rule-blocks
//!
//! A grid puzzle engine where the rules are pieces on the board.
//!
//! Text tokens laid out as `<Noun> is <Rule>` sentences decide which kinds
//! of piece the player controls (`You`), which get pushed (`Push`), which
//! block (`Stop`) and which end the level (`Win`). `<Noun> is <Noun>`
//! sentences turn every piece of one kind into another. Rules are re-read
//! from scratch after every move, so pushing words around changes the game.
//!
//! ## Design Principles
//!
//! 1. **Rendering-Agnostic**: The engine never touches models or sounds.
//!    It talks to a [`Presenter`](visual::Presenter) through opaque handles.
//!
//! 2. **Rebuild, Don't Patch**: The rule set is derived from the board
//!    every turn. Nothing about rules is stored between turns.
//!
//! 3. **Layouts Are Data**: Levels are built from a static
//!    [`Layout`](level::Layout) descriptor.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Grids are `im` vectors, so a snapshot
//!   or a push checkpoint is an O(1) clone.
//!
//! - **Transactional Pushes**: A failed push chain restores the checkpoint;
//!   a blocked move leaves no trace.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, kinds, positions, configuration
//! - `grid`: Per-cell entity stacks
//! - `movement`: Move and push resolution
//! - `rules`: Sentence scanning and rule sets
//! - `level`: Layouts, levels and the turn entry point
//! - `history`: Bounded undo snapshots
//! - `session`: Input-driven play sessions
//! - `levels`: The classic levels
//! - `observe`: Tensor observations for agents
//! - `visual`: The presenter contract

pub mod core;
pub mod error;
pub mod grid;
pub mod history;
pub mod level;
pub mod levels;
pub mod movement;
pub mod observe;
pub mod rules;
pub mod session;
pub mod visual;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    Direction, EngineConfig, Entity, EntityId, Kind, NounKind, Position, RuleKind, Word,
};

pub use crate::error::{EngineError, EngineResult};

pub use crate::grid::Grid;

pub use crate::level::{Layout, Level, Placement, PlacementKind, TurnOutcome};

pub use crate::history::History;

pub use crate::rules::{Derivation, RuleSet, Transform};

pub use crate::session::{Command, Game, Outcome};

pub use crate::visual::{Furniture, Headless, Presenter, Recorder, VisualHandle, VisualPosition};
