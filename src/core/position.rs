//! Board coordinates and movement directions.
//!
//! Boards are addressed by `(x, z)`: `x` runs along the level's length,
//! `z` along its width. The vertical coordinate is a stack index and is
//! owned by the grid, not by `Position`.

use serde::{Deserialize, Serialize};

/// A cell coordinate on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub z: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: usize, z: usize) -> Self {
        Self { x, z }
    }

    /// The neighbouring cell in `dir`, if it lies on a `length × width` board.
    ///
    /// ```
    /// use rule_blocks::core::{Direction, Position};
    ///
    /// let origin = Position::new(0, 0);
    /// assert_eq!(origin.step(Direction::PosX, 3, 3), Some(Position::new(1, 0)));
    /// assert_eq!(origin.step(Direction::NegX, 3, 3), None);
    /// ```
    #[must_use]
    pub fn step(self, dir: Direction, length: usize, width: usize) -> Option<Position> {
        let (dx, dz) = dir.delta();
        let x = self.x.checked_add_signed(dx)?;
        let z = self.z.checked_add_signed(dz)?;
        (x < length && z < width).then_some(Position { x, z })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// One of the four axis-aligned movement directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `(+1, 0)`
    #[default]
    PosX,
    /// `(-1, 0)`
    NegX,
    /// `(0, +1)`
    PosZ,
    /// `(0, -1)`
    NegZ,
}

impl Direction {
    /// All directions.
    pub const ALL: [Direction; 4] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosZ,
        Direction::NegZ,
    ];

    /// Unit offset `(dx, dz)`.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::PosX => (1, 0),
            Direction::NegX => (-1, 0),
            Direction::PosZ => (0, 1),
            Direction::NegZ => (0, -1),
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Direction::PosX => Direction::NegX,
            Direction::NegX => Direction::PosX,
            Direction::PosZ => Direction::NegZ,
            Direction::NegZ => Direction::PosZ,
        }
    }

    /// Yaw of a model facing this way, in radians.
    ///
    /// `π·min(0, dz) + (π/2)·dx`: `+z` faces 0, `-z` faces `-π`,
    /// `+x` faces `π/2` and `-x` faces `-π/2`.
    #[must_use]
    pub fn rotation(self) -> f32 {
        let (dx, dz) = self.delta();
        std::f32::consts::PI * dz.min(0) as f32 + std::f32::consts::FRAC_PI_2 * dx as f32
    }

    /// Keyboard binding used by the stock front end (`WASD`).
    ///
    /// `d` is `+x`, `a` is `-x`, `w` is `-z` and `s` is `+z`.
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'd' => Some(Direction::PosX),
            'a' => Some(Direction::NegX),
            'w' => Some(Direction::NegZ),
            's' => Some(Direction::PosZ),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::PosX => "+x",
            Direction::NegX => "-x",
            Direction::PosZ => "+z",
            Direction::NegZ => "-z",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_in_bounds() {
        let pos = Position::new(1, 1);

        assert_eq!(pos.step(Direction::PosX, 3, 3), Some(Position::new(2, 1)));
        assert_eq!(pos.step(Direction::NegX, 3, 3), Some(Position::new(0, 1)));
        assert_eq!(pos.step(Direction::PosZ, 3, 3), Some(Position::new(1, 2)));
        assert_eq!(pos.step(Direction::NegZ, 3, 3), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_step_off_board() {
        let corner = Position::new(2, 0);

        assert_eq!(corner.step(Direction::PosX, 3, 3), None);
        assert_eq!(corner.step(Direction::NegZ, 3, 3), None);
        // Length and width are independent
        assert_eq!(Position::new(0, 4).step(Direction::PosZ, 2, 5), None);
    }

    #[test]
    fn test_reverse() {
        for dir in Direction::ALL {
            assert_eq!(dir.reverse().reverse(), dir);
            let (dx, dz) = dir.delta();
            assert_eq!(dir.reverse().delta(), (-dx, -dz));
        }
    }

    #[test]
    fn test_rotation() {
        use std::f32::consts::{FRAC_PI_2, PI};

        assert_eq!(Direction::PosZ.rotation(), 0.0);
        assert_eq!(Direction::NegZ.rotation(), -PI);
        assert_eq!(Direction::PosX.rotation(), FRAC_PI_2);
        assert_eq!(Direction::NegX.rotation(), -FRAC_PI_2);
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Direction::from_key('d'), Some(Direction::PosX));
        assert_eq!(Direction::from_key('A'), Some(Direction::NegX));
        assert_eq!(Direction::from_key('w'), Some(Direction::NegZ));
        assert_eq!(Direction::from_key('s'), Some(Direction::PosZ));
        assert_eq!(Direction::from_key('z'), None);
    }
}
