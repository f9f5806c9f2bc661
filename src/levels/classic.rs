//! The three classic 20×20 levels.

use crate::core::{Direction, NounKind};
use crate::level::{Layout, Placement};

/// Side length of every classic board.
pub const CLASSIC_SIZE: usize = 20;

fn board() -> Layout {
    Layout::new(CLASSIC_SIZE, CLASSIC_SIZE)
}

fn baba(x: usize, z: usize, facing: Direction) -> Placement {
    Placement::noun(NounKind::Baba, x, z).facing(facing)
}

/// Level one: push the rocks aside and reach the flag.
///
/// Solved by walking `+x` seven times.
#[must_use]
pub fn level_one() -> Layout {
    let mut layout = board()
        .with(baba(6, 10, Direction::PosX))
        .with_noun(NounKind::Flag, 13, 10)
        .with_noun(NounKind::Rock, 10, 9)
        .with_noun(NounKind::Rock, 10, 10)
        .with_noun(NounKind::Rock, 10, 11)
        .with_sentence("Baba", "You", 5, 6)
        .with_sentence("Rock", "Push", 12, 14)
        .with_sentence("Flag", "Win", 12, 6)
        .with_sentence("Wall", "Stop", 5, 14);

    for i in 0..10 {
        layout.push(Placement::noun(NounKind::Wall, i + 5, 8));
        layout.push(Placement::noun(NounKind::Wall, i + 5, 12));
    }
    layout
}

const LEVEL_TWO_WALLS: [(usize, usize); 52] = [
    (4, 8), (4, 9), (4, 10), (4, 11), (4, 12), (5, 8), (5, 12), (6, 8), (6, 12), (7, 8),
    (7, 12), (8, 8), (8, 12), (8, 8), (8, 7), (8, 6), (8, 5), (8, 4), (8, 3), (8, 2),
    (9, 2), (10, 2), (11, 2), (12, 2), (14, 2), (15, 2), (16, 2), (17, 2), (18, 2), (19, 2),
    (9, 12), (10, 12), (10, 13), (10, 14), (10, 15), (10, 16), (11, 16), (12, 16), (13, 16),
    (14, 16), (15, 16), (16, 16), (17, 16), (18, 16), (18, 15), (18, 14), (18, 13), (18, 12),
    (18, 11), (18, 10), (18, 9), (18, 8),
];

/// Level two: the flag sits behind water; `Wall is Stop` can be broken up.
#[must_use]
pub fn level_two() -> Layout {
    let mut layout = board()
        .with(baba(6, 10, Direction::PosX))
        .with_noun(NounKind::Flag, 17, 4)
        .with_text("Baba", 6, 15)
        .with_text("is", 6, 16)
        .with_text("You", 6, 17)
        .with_text("Water", 0, 1)
        .with_text("is", 0, 2)
        .with_text("Stop", 0, 3)
        .with_text("Flag", 0, 5)
        .with_text("is", 0, 6)
        .with_text("Win", 0, 7)
        .with_sentence("Wall", "Stop", 13, 14);

    for i in 0..7 {
        layout.push(Placement::noun(NounKind::Water, 13, i));
        layout.push(Placement::noun(NounKind::Water, i + 13, 7));
    }
    for (x, z) in LEVEL_TWO_WALLS {
        layout.push(Placement::noun(NounKind::Wall, x, z));
    }
    layout
}

const LEVEL_THREE_ROCKS: [(usize, usize); 16] = [
    (3, 5), (7, 3), (11, 12), (11, 14), (8, 12), (8, 13), (8, 14), (9, 15),
    (13, 12), (12, 11), (10, 11), (9, 10), (12, 4), (5, 15), (6, 13), (7, 7),
];

/// Level three: a walled room with `Flag` and `Win` but no `is` between them.
#[must_use]
pub fn level_three() -> Layout {
    let mut layout = board()
        .with(baba(6, 10, Direction::PosZ))
        .with_noun(NounKind::Flag, 13, 4)
        .with_sentence("Baba", "You", 4, 4)
        .with_text("Rock", 19, 14)
        .with_text("is", 19, 15)
        .with_text("Stop", 19, 16)
        .with_text("Flag", 10, 13)
        .with_text("Win", 12, 13);

    for i in 0..13 {
        layout.push(Placement::noun(NounKind::Wall, i + 2, 2));
        layout.push(Placement::noun(NounKind::Wall, i + 2, 16));
    }
    for i in 0..13 {
        layout.push(Placement::noun(NounKind::Wall, 2, i + 3));
        layout.push(Placement::noun(NounKind::Wall, 14, i + 3));
    }
    for (x, z) in LEVEL_THREE_ROCKS {
        layout.push(Placement::noun(NounKind::Rock, x, z));
    }
    layout
}
