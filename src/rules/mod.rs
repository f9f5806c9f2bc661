//! Rule derivation: reading sentences off the board.
//!
//! Each turn the engine throws away the previous [`RuleSet`] and rebuilds
//! it by reading every `<Noun> is <Rule>` sentence around the level's `is`
//! tokens. `<Noun> is <Noun>` sentences transform pieces in place as they
//! are read. See [`scan`] for the scan order.

pub mod scan;
pub mod ruleset;

pub use scan::{derive, transform, Derivation, Transform};
pub use ruleset::RuleSet;
