//! Sentence scanning: `<Noun> is <Rule>` and `<Noun> is <Noun>`.
//!
//! ## Scan order
//!
//! `is` tokens are visited in creation order; for each, the horizontal
//! sentence (left subject, right predicate) is read before the vertical one
//! (`z-1` subject, `z+1` predicate). A token on the edge of an axis has no
//! sentence on that axis.
//!
//! Transforms are applied the moment they are read. A later sentence in
//! the same pass sees the board as already transformed, and when two
//! sentences transform the same kind the one read last wins.

use log::{debug, warn};
use smallvec::SmallVec;

use super::ruleset::RuleSet;
use crate::core::{Direction, EntityId, Kind, NounKind, Position, Word};
use crate::error::EngineError;
use crate::grid::Grid;
use crate::visual::Presenter;

/// A kind transform applied during a pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transform {
    /// The `is` token whose sentence requested it.
    pub token: EntityId,
    pub from: NounKind,
    pub to: NounKind,
    /// Pieces changed.
    pub count: usize,
}

/// Outcome of one derivation pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Derivation {
    /// The rebuilt rule set.
    pub rules: RuleSet,

    /// Transforms in the order they were applied.
    pub transforms: Vec<Transform>,

    /// Sentences that could not be applied.
    pub diagnostics: Vec<EngineError>,
}

impl Derivation {
    /// Total pieces changed by transforms.
    #[must_use]
    pub fn transformed(&self) -> usize {
        self.transforms.iter().map(|t| t.count).sum()
    }
}

/// Sentence axes, in scan order.
const AXES: [(Direction, Direction); 2] = [
    (Direction::NegX, Direction::PosX),
    (Direction::NegZ, Direction::PosZ),
];

/// Rebuild the rule set from the board and apply transform sentences.
///
/// `is_tokens` must be the level's `is` connectors in creation order.
pub fn derive(grid: &mut Grid, is_tokens: &[EntityId], presenter: &mut dyn Presenter) -> Derivation {
    let mut out = Derivation::default();

    for &token in is_tokens {
        let pos = grid.entity(token).pos;
        for (before, after) in AXES {
            let (Some(subject), Some(predicate)) =
                (grid.neighbour(pos, before), grid.neighbour(pos, after))
            else {
                continue;
            };
            read_sentence(grid, token, subject, predicate, presenter, &mut out);
        }
    }

    debug!(
        "derived {} rules, {} transforms, {} diagnostics",
        out.rules.len(),
        out.transforms.len(),
        out.diagnostics.len()
    );
    out
}

fn read_sentence(
    grid: &mut Grid,
    token: EntityId,
    subject: Position,
    predicate: Position,
    presenter: &mut dyn Presenter,
    out: &mut Derivation,
) {
    let subjects: SmallVec<[NounKind; 2]> = grid
        .cell_at(subject)
        .iter()
        .filter_map(|&id| match grid.entity(id).kind {
            Kind::Text(Word::Noun(noun)) => Some(noun),
            _ => None,
        })
        .collect();
    if subjects.is_empty() {
        return;
    }

    // Transforms only rewrite noun pieces, so the text in the predicate
    // cell is stable for the whole sentence.
    let predicates: SmallVec<[EntityId; 2]> = grid
        .cell_at(predicate)
        .iter()
        .copied()
        .filter(|&id| grid.entity(id).kind.is_text())
        .collect();

    for &noun in &subjects {
        for &id in &predicates {
            match grid.entity(id).kind {
                Kind::Text(Word::Rule(rule)) => {
                    if out.rules.add(noun, rule) {
                        debug!("rule: {} is {}", noun, rule);
                    }
                }
                Kind::Text(Word::Noun(to)) => {
                    let count = transform(grid, noun, to, presenter);
                    if count > 0 {
                        out.transforms.push(Transform {
                            token,
                            from: noun,
                            to,
                            count,
                        });
                    }
                }
                Kind::Text(Word::Unknown) => {
                    let err = EngineError::InvalidKindTransform {
                        word: grid.entity(id).payload().to_owned(),
                    };
                    warn!("ignoring sentence about {}: {}", noun, err);
                    out.diagnostics.push(err);
                }
                Kind::Text(Word::Is) | Kind::Noun(_) => {}
            }
        }
    }
}

/// Turn every placed `from` piece into a `to` piece, in place.
///
/// Each changed piece keeps its cell, stack slot and facing and gets a
/// fresh model; the old model is disposed. `from == to` changes nothing.
///
/// Returns the number of pieces changed.
pub fn transform(grid: &mut Grid, from: NounKind, to: NounKind, presenter: &mut dyn Presenter) -> usize {
    if from == to {
        return 0;
    }

    let targets: SmallVec<[EntityId; 16]> = grid.entities_of(from).collect();
    for &id in &targets {
        let entity = grid.entity_mut(id);
        let old = entity.visual;
        entity.kind = Kind::Noun(to);
        entity.visual = presenter.acquire_visual(
            entity.kind,
            entity.visual_position(),
            entity.facing.rotation(),
        );
        presenter.dispose_visual(old);
    }

    if !targets.is_empty() {
        debug!("transformed {} {} into {}", targets.len(), from, to);
    }
    targets.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Entity, RuleKind};
    use crate::visual::{Recorder, VisualPosition};

    struct Board {
        grid: Grid,
        is_tokens: Vec<EntityId>,
        presenter: Recorder,
    }

    impl Board {
        fn new(length: usize, width: usize) -> Self {
            Self {
                grid: Grid::new(length, width),
                is_tokens: Vec::new(),
                presenter: Recorder::new(),
            }
        }

        fn text(&mut self, x: usize, z: usize, word: &str) -> EntityId {
            let mut entity = Entity::text(self.grid.next_id(), word, Position::new(x, z));
            entity.visual = self.presenter.acquire_visual(entity.kind, VisualPosition::default(), 0.0);
            let id = self.grid.insert(entity);
            if self.grid.entity(id).kind == Kind::Text(Word::Is) {
                self.is_tokens.push(id);
            }
            id
        }

        fn noun(&mut self, x: usize, z: usize, noun: NounKind) -> EntityId {
            let mut entity = Entity::noun(self.grid.next_id(), noun, Position::new(x, z), Direction::PosX);
            entity.visual = self.presenter.acquire_visual(entity.kind, VisualPosition::default(), 0.0);
            self.grid.insert(entity)
        }

        fn sentence(&mut self, x: usize, z: usize, words: [&str; 3]) {
            self.text(x, z, words[0]);
            self.text(x + 1, z, words[1]);
            self.text(x + 2, z, words[2]);
        }

        fn derive(&mut self) -> Derivation {
            derive(&mut self.grid, &self.is_tokens, &mut self.presenter)
        }
    }

    #[test]
    fn test_horizontal_rule() {
        let mut board = Board::new(5, 5);
        board.sentence(1, 2, ["Baba", "is", "You"]);

        let d = board.derive();

        assert!(d.rules.contains(NounKind::Baba, RuleKind::You));
        assert_eq!(d.rules.len(), 1);
        assert!(d.transforms.is_empty());
    }

    #[test]
    fn test_vertical_rule() {
        let mut board = Board::new(5, 5);
        board.text(2, 1, "Wall");
        board.text(2, 2, "is");
        board.text(2, 3, "Stop");

        let d = board.derive();
        assert!(d.rules.contains(NounKind::Wall, RuleKind::Stop));
    }

    #[test]
    fn test_token_shared_by_both_axes() {
        let mut board = Board::new(5, 5);
        board.sentence(1, 2, ["Baba", "is", "You"]);
        board.text(2, 1, "Flag");
        board.text(2, 3, "Win");

        let d = board.derive();
        assert!(d.rules.contains(NounKind::Baba, RuleKind::You));
        assert!(d.rules.contains(NounKind::Flag, RuleKind::Win));
    }

    #[test]
    fn test_edge_token_is_skipped() {
        let mut board = Board::new(3, 3);
        // "is" on the x = 0 edge: no horizontal sentence
        board.text(0, 1, "is");
        board.text(1, 1, "Push");

        let d = board.derive();
        assert!(d.rules.is_empty());
    }

    #[test]
    fn test_wrong_word_order_makes_nothing() {
        let mut board = Board::new(5, 5);
        board.sentence(1, 1, ["You", "is", "Baba"]);

        let d = board.derive();
        assert!(d.rules.is_empty());
        assert!(d.transforms.is_empty());
    }

    #[test]
    fn test_noun_piece_is_not_a_subject() {
        let mut board = Board::new(5, 5);
        board.noun(1, 1, NounKind::Rock);
        board.text(2, 1, "is");
        board.text(3, 1, "Push");

        assert!(board.derive().rules.is_empty());
    }

    #[test]
    fn test_transform_in_place() {
        let mut board = Board::new(6, 6);
        board.sentence(0, 0, ["Rock", "is", "Wall"]);
        board.noun(4, 4, NounKind::Baba);
        let rock = board.noun(4, 4, NounKind::Rock);
        let old_visual = board.grid.entity(rock).visual;

        let d = board.derive();

        let entity = board.grid.entity(rock);
        assert_eq!(entity.kind, Kind::Noun(NounKind::Wall));
        assert_eq!(entity.pos, Position::new(4, 4));
        assert_eq!(entity.y, 1);
        assert_ne!(entity.visual, old_visual);
        assert!(!board.presenter.is_live(old_visual));
        assert!(board.presenter.is_live(entity.visual));
        assert_eq!(d.transformed(), 1);
        assert_eq!(d.transforms[0].from, NounKind::Rock);
        assert_eq!(d.transforms[0].to, NounKind::Wall);
    }

    #[test]
    fn test_transforms_chain_within_pass() {
        let mut board = Board::new(8, 8);
        board.sentence(0, 0, ["Rock", "is", "Wall"]);
        board.sentence(0, 2, ["Wall", "is", "Flag"]);
        let rock = board.noun(6, 6, NounKind::Rock);

        board.derive();

        // Rock became Wall, then every Wall became Flag
        assert_eq!(board.grid.entity(rock).kind, Kind::Noun(NounKind::Flag));
    }

    #[test]
    fn test_conflicting_transforms_follow_scan_order() {
        let mut board = Board::new(8, 8);
        board.sentence(0, 0, ["Rock", "is", "Wall"]);
        board.sentence(0, 2, ["Rock", "is", "Flag"]);
        let rock = board.noun(6, 6, NounKind::Rock);

        let d = board.derive();

        // The first sentence already consumed every Rock
        assert_eq!(board.grid.entity(rock).kind, Kind::Noun(NounKind::Wall));
        assert_eq!(d.transforms.len(), 1);
    }

    #[test]
    fn test_identity_transform_is_noop() {
        let mut board = Board::new(6, 6);
        board.sentence(0, 0, ["Rock", "is", "Rock"]);
        let rock = board.noun(4, 4, NounKind::Rock);
        let visual = board.grid.entity(rock).visual;

        let d = board.derive();

        assert!(d.transforms.is_empty());
        assert_eq!(board.grid.entity(rock).visual, visual);
    }

    #[test]
    fn test_unknown_predicate_is_reported() {
        let mut board = Board::new(6, 6);
        board.sentence(0, 0, ["Baba", "is", "Key"]);
        board.sentence(0, 1, ["Baba", "is", "You"]);

        let d = board.derive();

        assert_eq!(
            d.diagnostics,
            vec![EngineError::InvalidKindTransform { word: "Key".into() }]
        );
        // The bad sentence does not stop the scan
        assert!(d.rules.contains(NounKind::Baba, RuleKind::You));
    }

    #[test]
    fn test_stacked_words_all_apply() {
        let mut board = Board::new(5, 5);
        board.text(1, 1, "Baba");
        board.text(1, 1, "Rock");
        board.text(2, 1, "is");
        board.text(3, 1, "Push");
        board.text(3, 1, "Stop");

        let d = board.derive();
        assert_eq!(d.rules.len(), 4);
        assert!(d.rules.contains(NounKind::Rock, RuleKind::Stop));
        assert!(d.rules.contains(NounKind::Baba, RuleKind::Push));
    }

    #[test]
    fn test_derive_is_repeatable() {
        let mut board = Board::new(8, 8);
        board.sentence(0, 0, ["Baba", "is", "You"]);
        board.sentence(0, 2, ["Rock", "is", "Wall"]);
        board.sentence(0, 4, ["Wall", "is", "Stop"]);
        board.noun(6, 6, NounKind::Rock);

        let first = board.derive();
        let second = board.derive();

        assert_eq!(first.rules, second.rules);
        assert!(second.transforms.is_empty());
    }
}
