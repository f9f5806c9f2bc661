//! Error types for the engine.
//!
//! Nothing here is fatal to a running level: movement treats the board edge
//! as a wall, derivation reports bad sentences and carries on, and the
//! session turns an empty undo history into a no-op. Only layout loading
//! fails outright.

use crate::core::Position;

/// Errors reported by engine operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// A placement or lookup referenced a cell outside the board.
    #[error("position {pos} is outside the {length}x{width} board")]
    OutOfBounds {
        pos: Position,
        length: usize,
        width: usize,
    },

    /// A sentence tried to turn pieces into a kind the engine does not know.
    #[error("cannot transform into unknown kind '{word}'")]
    InvalidKindTransform { word: String },

    /// Undo was requested with no snapshots recorded.
    #[error("no snapshot to undo")]
    UndoUnderflow,

    /// The layout descriptor is unusable.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

/// Convenience result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
