//! Piece kinds, rule kinds and the words printed on text tokens.
//!
//! Everything that can be placed on a board is either a *noun* piece
//! (Baba, a wall, a rock...) or a text token carrying a [`Word`]. Words are
//! resolved once, when the token is created, so the per-turn rule scan
//! never compares strings.
//!
//! ## Tables
//!
//! Per-kind data (display name, vertical visual offset) lives in `const`
//! tables indexed by the enum discriminant rather than in string-keyed maps.

use serde::{Deserialize, Serialize};

/// Category of placeable game piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NounKind {
    Baba,
    Wall,
    Water,
    Rock,
    Flag,
}

const NOUN_NAMES: [&str; NounKind::COUNT] = ["Baba", "Wall", "Water", "Rock", "Flag"];

/// Vertical offset applied to a piece's model so it sits on its stack slot.
const NOUN_OFFSETS: [f32; NounKind::COUNT] = [-0.26, 0.0, 0.0, -0.04, -0.04];

impl NounKind {
    /// Number of noun kinds.
    pub const COUNT: usize = 5;

    /// All noun kinds in declaration order.
    pub const ALL: [NounKind; Self::COUNT] = [
        NounKind::Baba,
        NounKind::Wall,
        NounKind::Water,
        NounKind::Rock,
        NounKind::Flag,
    ];

    /// Dense index of this kind (declaration order).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name as printed on a text token.
    #[must_use]
    pub const fn name(self) -> &'static str {
        NOUN_NAMES[self as usize]
    }

    /// Vertical offset of this kind's model.
    #[must_use]
    pub const fn visual_offset(self) -> f32 {
        NOUN_OFFSETS[self as usize]
    }

    /// Resolve a token payload to a noun kind (ASCII case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for NounKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Behaviour tag a sentence can grant to a noun kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleKind {
    /// Moved by player input.
    You,
    /// Pushed by movers.
    Push,
    /// Blocks movement.
    Stop,
    /// Completes the level when a `You` piece stands on it.
    Win,
}

const RULE_NAMES: [&str; RuleKind::COUNT] = ["You", "Push", "Stop", "Win"];

impl RuleKind {
    /// Number of rule kinds.
    pub const COUNT: usize = 4;

    /// All rule kinds in declaration order.
    pub const ALL: [RuleKind; Self::COUNT] =
        [RuleKind::You, RuleKind::Push, RuleKind::Stop, RuleKind::Win];

    /// Dense index of this rule (declaration order).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name as printed on a text token.
    #[must_use]
    pub const fn name(self) -> &'static str {
        RULE_NAMES[self as usize]
    }

    /// Resolve a token payload to a rule kind (ASCII case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved meaning of a text token's payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Word {
    /// The `is` connector.
    Is,
    /// Names a noun kind.
    Noun(NounKind),
    /// Names a rule kind.
    Rule(RuleKind),
    /// Payload that names nothing the engine knows about.
    ///
    /// Such tokens are still pushable but never complete a sentence.
    Unknown,
}

impl Word {
    /// Resolve a payload string.
    ///
    /// ```
    /// use rule_blocks::core::{NounKind, RuleKind, Word};
    ///
    /// assert_eq!(Word::parse("is"), Word::Is);
    /// assert_eq!(Word::parse("Rock"), Word::Noun(NounKind::Rock));
    /// assert_eq!(Word::parse("win"), Word::Rule(RuleKind::Win));
    /// assert_eq!(Word::parse("Key"), Word::Unknown);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.eq_ignore_ascii_case("is") {
            Word::Is
        } else if let Some(noun) = NounKind::from_name(text) {
            Word::Noun(noun)
        } else if let Some(rule) = RuleKind::from_name(text) {
            Word::Rule(rule)
        } else {
            Word::Unknown
        }
    }
}

/// Kind of a placed entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// A noun piece.
    Noun(NounKind),
    /// A text token.
    Text(Word),
}

impl Kind {
    /// The noun kind, if this is a noun piece.
    #[must_use]
    pub const fn noun(self) -> Option<NounKind> {
        match self {
            Kind::Noun(noun) => Some(noun),
            Kind::Text(_) => None,
        }
    }

    /// The word, if this is a text token.
    #[must_use]
    pub const fn word(self) -> Option<Word> {
        match self {
            Kind::Text(word) => Some(word),
            Kind::Noun(_) => None,
        }
    }

    /// Check if this is a text token.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Kind::Text(_))
    }

    /// Vertical offset of this kind's model. Text tokens sit flush.
    #[must_use]
    pub const fn visual_offset(self) -> f32 {
        match self {
            Kind::Noun(noun) => noun.visual_offset(),
            Kind::Text(_) => 0.0,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Noun(noun) => write!(f, "{}", noun),
            Kind::Text(Word::Is) => f.write_str("Text(is)"),
            Kind::Text(Word::Noun(noun)) => write!(f, "Text({})", noun),
            Kind::Text(Word::Rule(rule)) => write!(f, "Text({})", rule),
            Kind::Text(Word::Unknown) => f.write_str("Text(?)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noun_names_round_trip() {
        for noun in NounKind::ALL {
            assert_eq!(NounKind::from_name(noun.name()), Some(noun));
        }
        assert_eq!(NounKind::from_name("flag"), Some(NounKind::Flag));
        assert_eq!(NounKind::from_name("Text"), None);
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(RuleKind::from_name("STOP"), Some(RuleKind::Stop));
        assert_eq!(RuleKind::from_name("Baba"), None);
        assert_eq!(RuleKind::Win.index(), 3);
    }

    #[test]
    fn test_offsets() {
        assert_eq!(NounKind::Baba.visual_offset(), -0.26);
        assert_eq!(NounKind::Rock.visual_offset(), -0.04);
        assert_eq!(NounKind::Wall.visual_offset(), 0.0);
        assert_eq!(Kind::Text(Word::Is).visual_offset(), 0.0);
    }

    #[test]
    fn test_word_parse() {
        assert_eq!(Word::parse("IS"), Word::Is);
        assert_eq!(Word::parse("Water"), Word::Noun(NounKind::Water));
        assert_eq!(Word::parse("Push"), Word::Rule(RuleKind::Push));
        assert_eq!(Word::parse(""), Word::Unknown);
    }

    #[test]
    fn test_kind_accessors() {
        let rock = Kind::Noun(NounKind::Rock);
        let text = Kind::Text(Word::Is);

        assert_eq!(rock.noun(), Some(NounKind::Rock));
        assert!(!rock.is_text());
        assert_eq!(text.word(), Some(Word::Is));
        assert!(text.is_text());
        assert_eq!(format!("{}", text), "Text(is)");
        assert_eq!(format!("{}", rock), "Rock");
    }
}
