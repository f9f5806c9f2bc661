//! Entity identification and per-piece data.
//!
//! Every piece on a board (noun or text token) has a unique `EntityId`.
//!
//! ## ID Layout
//!
//! IDs are dense indices into the level's entity arena, allocated in
//! creation order. The order is significant: the rule scan visits `is`
//! tokens in creation order and `You` pieces move in creation order.
//!
//! ```
//! use rule_blocks::core::EntityId;
//!
//! let first = EntityId::new(0);
//! assert_eq!(first.index(), 0);
//! assert_eq!(format!("{}", EntityId::new(7)), "Entity(7)");
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::kind::{Kind, NounKind};
use super::position::{Direction, Position};
use crate::visual::{VisualHandle, VisualPosition};

/// Unique identifier for a placed piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Index into the entity arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// A placed piece.
///
/// `pos` and `y` are maintained by the grid; `y` is the piece's slot in its
/// cell's stack and is rewritten whenever that stack changes.
#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,

    /// Noun kind or text token. Rewritten in place by kind transforms.
    pub kind: Kind,

    /// Cell the piece occupies.
    pub pos: Position,

    /// Stack slot within the cell (0 = bottom).
    pub y: usize,

    /// Raw token text. `None` for noun pieces; never changes once set.
    payload: Option<Arc<str>>,

    /// Direction of the last successful move.
    pub facing: Direction,

    /// Presenter-owned model for this piece.
    pub visual: VisualHandle,
}

impl Entity {
    /// Create a noun piece.
    #[must_use]
    pub fn noun(id: EntityId, noun: NounKind, pos: Position, facing: Direction) -> Self {
        Self {
            id,
            kind: Kind::Noun(noun),
            pos,
            y: 0,
            payload: None,
            facing,
            visual: VisualHandle::UNBOUND,
        }
    }

    /// Create a text token. The word is resolved from `text` once, here.
    #[must_use]
    pub fn text(id: EntityId, text: &str, pos: Position) -> Self {
        Self {
            id,
            kind: Kind::Text(super::kind::Word::parse(text)),
            pos,
            y: 0,
            payload: Some(Arc::from(text)),
            facing: Direction::default(),
            visual: VisualHandle::UNBOUND,
        }
    }

    /// Raw token text (empty for noun pieces).
    #[must_use]
    pub fn payload(&self) -> &str {
        self.payload.as_deref().unwrap_or("")
    }

    /// Presenter position of this piece's model: grid units, with the
    /// stack slot raised by the kind's vertical offset.
    #[must_use]
    pub fn visual_position(&self) -> VisualPosition {
        VisualPosition {
            x: self.pos.x as f32,
            y: self.visual_height(),
            z: self.pos.z as f32,
        }
    }

    /// Model height for the current stack slot.
    #[must_use]
    pub fn visual_height(&self) -> f32 {
        self.y as f32 + self.kind.visual_offset()
    }
}
