//! Built-in layouts.

mod classic;

pub use classic::{level_one, level_three, level_two, CLASSIC_SIZE};

use crate::level::Layout;

/// Number of classic levels.
pub const CLASSIC_COUNT: usize = 3;

/// Classic level by zero-based index.
#[must_use]
pub fn classic(index: usize) -> Option<Layout> {
    match index {
        0 => Some(level_one()),
        1 => Some(level_two()),
        2 => Some(level_three()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_index() {
        assert_eq!(classic(0), Some(level_one()));
        assert_eq!(classic(2), Some(level_three()));
        assert!(classic(CLASSIC_COUNT).is_none());
    }
}
