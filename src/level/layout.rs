//! Static level descriptors.
//!
//! A [`Layout`] lists what starts where. It is plain data: it can be built
//! in code, loaded from JSON, and handed to [`Level::new`](super::Level::new)
//! any number of times.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, NounKind, Position};
use crate::error::{EngineError, EngineResult};

/// What a placement creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementKind {
    Baba,
    Wall,
    Water,
    Rock,
    Flag,
    /// A text token; the word comes from [`Placement::text`].
    Text,
}

impl PlacementKind {
    /// The noun kind placed, or `None` for text.
    #[must_use]
    pub const fn noun(self) -> Option<NounKind> {
        match self {
            PlacementKind::Baba => Some(NounKind::Baba),
            PlacementKind::Wall => Some(NounKind::Wall),
            PlacementKind::Water => Some(NounKind::Water),
            PlacementKind::Rock => Some(NounKind::Rock),
            PlacementKind::Flag => Some(NounKind::Flag),
            PlacementKind::Text => None,
        }
    }
}

impl From<NounKind> for PlacementKind {
    fn from(noun: NounKind) -> Self {
        match noun {
            NounKind::Baba => PlacementKind::Baba,
            NounKind::Wall => PlacementKind::Wall,
            NounKind::Water => PlacementKind::Water,
            NounKind::Rock => PlacementKind::Rock,
            NounKind::Flag => PlacementKind::Flag,
        }
    }
}

/// One piece of a layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub x: usize,
    pub z: usize,
    pub kind: PlacementKind,

    /// Token text for [`PlacementKind::Text`]; ignored otherwise.
    #[serde(default)]
    pub text: String,

    /// Initial facing.
    #[serde(default)]
    pub facing: Direction,
}

impl Placement {
    /// A noun piece facing `+x`.
    #[must_use]
    pub fn noun(noun: NounKind, x: usize, z: usize) -> Self {
        Self {
            x,
            z,
            kind: noun.into(),
            text: String::new(),
            facing: Direction::default(),
        }
    }

    /// A text token.
    #[must_use]
    pub fn text(word: &str, x: usize, z: usize) -> Self {
        Self {
            x,
            z,
            kind: PlacementKind::Text,
            text: word.to_owned(),
            facing: Direction::default(),
        }
    }

    /// Set the initial facing.
    #[must_use]
    pub fn facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    /// Cell this placement targets.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.x, self.z)
    }
}

/// A board size plus its initial pieces, in creation order.
///
/// Creation order matters: it fixes entity IDs, which in turn fix the order
/// `is` tokens are scanned in and `You` pieces move in.
///
/// ## Example
///
/// ```
/// use rule_blocks::core::NounKind;
/// use rule_blocks::level::Layout;
///
/// let layout = Layout::new(5, 3)
///     .with_noun(NounKind::Baba, 0, 1)
///     .with_sentence("Baba", "You", 1, 0);
///
/// assert_eq!(layout.placements.len(), 4);
/// assert!(layout.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub length: usize,
    pub width: usize,
    #[serde(default)]
    pub placements: Vec<Placement>,
}

impl Layout {
    /// An empty `length × width` layout.
    #[must_use]
    pub fn new(length: usize, width: usize) -> Self {
        Self {
            length,
            width,
            placements: Vec::new(),
        }
    }

    /// Parse a layout from JSON and validate it.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let layout: Layout =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidLayout(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string(self).map_err(|e| EngineError::InvalidLayout(e.to_string()))
    }

    /// Append a placement.
    pub fn push(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    /// Add a placement (builder form).
    #[must_use]
    pub fn with(mut self, placement: Placement) -> Self {
        self.push(placement);
        self
    }

    /// Add a noun piece.
    #[must_use]
    pub fn with_noun(self, noun: NounKind, x: usize, z: usize) -> Self {
        self.with(Placement::noun(noun, x, z))
    }

    /// Add a text token.
    #[must_use]
    pub fn with_text(self, word: &str, x: usize, z: usize) -> Self {
        self.with(Placement::text(word, x, z))
    }

    /// Add a horizontal `<subject> is <predicate>` sentence starting at `(x, z)`.
    #[must_use]
    pub fn with_sentence(self, subject: &str, predicate: &str, x: usize, z: usize) -> Self {
        self.with_text(subject, x, z)
            .with_text("is", x + 1, z)
            .with_text(predicate, x + 2, z)
    }

    /// Check dimensions, bounds and token text.
    pub fn validate(&self) -> EngineResult<()> {
        if self.length == 0 || self.width == 0 {
            return Err(EngineError::InvalidLayout(format!(
                "board must be at least 1x1, got {}x{}",
                self.length, self.width
            )));
        }

        for placement in &self.placements {
            let pos = placement.position();
            if pos.x >= self.length || pos.z >= self.width {
                return Err(EngineError::OutOfBounds {
                    pos,
                    length: self.length,
                    width: self.width,
                });
            }
            if placement.kind == PlacementKind::Text && placement.text.is_empty() {
                return Err(EngineError::InvalidLayout(format!(
                    "text placement at {} has no word",
                    pos
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_kind_nouns() {
        for noun in NounKind::ALL {
            assert_eq!(PlacementKind::from(noun).noun(), Some(noun));
        }
        assert_eq!(PlacementKind::Text.noun(), None);
    }

    #[test]
    fn test_from_json() {
        let layout = Layout::from_json(
            r#"{
                "length": 4,
                "width": 2,
                "placements": [
                    {"x": 0, "z": 0, "kind": "Baba", "facing": "PosZ"},
                    {"x": 1, "z": 1, "kind": "Text", "text": "is"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(layout.length, 4);
        assert_eq!(layout.placements[0].kind, PlacementKind::Baba);
        assert_eq!(layout.placements[0].facing, Direction::PosZ);
        assert_eq!(layout.placements[1].text, "is");
        assert_eq!(layout.placements[1].facing, Direction::PosX);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = Layout::from_json(r#"{"length": "wide"}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidLayout(_)));
    }

    #[test]
    fn test_out_of_bounds_placement() {
        let layout = Layout::new(3, 3).with_noun(NounKind::Rock, 3, 0);

        assert_eq!(
            layout.validate(),
            Err(EngineError::OutOfBounds {
                pos: Position::new(3, 0),
                length: 3,
                width: 3,
            })
        );
    }

    #[test]
    fn test_zero_dimensions() {
        assert!(matches!(
            Layout::new(0, 4).validate(),
            Err(EngineError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_empty_text_rejected() {
        let layout = Layout::new(2, 2).with_text("", 0, 0);
        assert!(matches!(layout.validate(), Err(EngineError::InvalidLayout(_))));
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let layout = Layout::new(6, 6)
            .with_sentence("Rock", "Push", 0, 0)
            .with(Placement::noun(NounKind::Baba, 2, 3).facing(Direction::NegZ));

        let parsed = Layout::from_json(&layout.to_json().unwrap()).unwrap();
        assert_eq!(parsed, layout);
    }
}
