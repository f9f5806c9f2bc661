//! Board encoding for learning agents.

use crate::core::{Direction, Kind, NounKind, RuleKind};
use crate::level::Level;

use super::encoded::EncodedBoard;

/// Encodes a level into a tensor.
pub trait BoardEncoder: Send + Sync {
    /// Encode the level's current board and rules.
    fn encode(&self, level: &Level) -> EncodedBoard;

    /// Shape of the tensor produced for a `length × width` board.
    fn output_shape(&self, length: usize, width: usize) -> Vec<usize>;

    /// Number of distinct move inputs.
    fn action_space_size(&self) -> usize {
        Direction::ALL.len()
    }
}

/// Plane holding text tokens.
pub const TEXT_PLANE: usize = NounKind::COUNT;

/// Total planes produced by [`PlaneEncoder`].
pub const PLANE_COUNT: usize = NounKind::COUNT + 1 + RuleKind::COUNT;

/// Plane holding cells with a piece tagged `rule`.
#[must_use]
pub const fn rule_plane(rule: RuleKind) -> usize {
    TEXT_PLANE + 1 + rule.index()
}

/// One binary plane per noun kind, one for text, one per rule.
///
/// Shape `[PLANE_COUNT, length, width]`:
/// - planes `0..5`: a piece of that noun kind is in the cell;
/// - plane `5`: a text token is in the cell;
/// - planes `6..10`: a piece tagged You / Push / Stop / Win is in the cell
///   (text counts as Push).
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaneEncoder;

impl PlaneEncoder {
    /// Create a new encoder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BoardEncoder for PlaneEncoder {
    fn encode(&self, level: &Level) -> EncodedBoard {
        let grid = level.grid();
        let (length, width) = (grid.length(), grid.width());
        let mut encoded = EncodedBoard::zeros(self.output_shape(length, width));
        let cell = |plane: usize, x: usize, z: usize| (plane * length + x) * width + z;

        for entity in grid.entities() {
            let (x, z) = (entity.pos.x, entity.pos.z);
            let plane = match entity.kind {
                Kind::Noun(noun) => noun.index(),
                Kind::Text(_) => TEXT_PLANE,
            };
            encoded.tensor[cell(plane, x, z)] = 1.0;

            for rule in RuleKind::ALL {
                if level.rules().applies(entity.kind, rule) {
                    encoded.tensor[cell(rule_plane(rule), x, z)] = 1.0;
                }
            }
        }
        encoded
    }

    fn output_shape(&self, length: usize, width: usize) -> Vec<usize> {
        vec![PLANE_COUNT, length, width]
    }
}
