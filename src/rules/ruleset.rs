//! The four behaviour-tag sets derived from the board each turn.

use rustc_hash::FxHashSet;

use crate::core::{Kind, NounKind, RuleKind};

/// Order rules are listed in by [`RuleSet`]'s `Display`.
const DISPLAY_ORDER: [RuleKind; RuleKind::COUNT] =
    [RuleKind::You, RuleKind::Stop, RuleKind::Push, RuleKind::Win];

/// Which noun kinds currently carry which behaviour tags.
///
/// Rebuilt from scratch by every derivation pass; never patched.
///
/// Text tokens are not members of any set but always count as `Push`
/// (see [`RuleSet::applies`]).
///
/// ## Example
///
/// ```
/// use rule_blocks::core::{Kind, NounKind, RuleKind, Word};
/// use rule_blocks::rules::RuleSet;
///
/// let mut rules = RuleSet::new();
/// rules.add(NounKind::Baba, RuleKind::You);
///
/// assert!(rules.applies(Kind::Noun(NounKind::Baba), RuleKind::You));
/// assert!(rules.applies(Kind::Text(Word::Is), RuleKind::Push));
/// assert_eq!(rules.to_string(), "Rules:\nBaba is You");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    sets: [FxHashSet<NounKind>; RuleKind::COUNT],
}

impl RuleSet {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every rule.
    pub fn clear(&mut self) {
        for set in &mut self.sets {
            set.clear();
        }
    }

    /// Grant `rule` to `noun`. Returns false if it was already granted.
    pub fn add(&mut self, noun: NounKind, rule: RuleKind) -> bool {
        self.sets[rule.index()].insert(noun)
    }

    /// Check if `noun` carries `rule`.
    #[must_use]
    pub fn contains(&self, noun: NounKind, rule: RuleKind) -> bool {
        self.sets[rule.index()].contains(&noun)
    }

    /// Check if a piece of `kind` behaves as `rule`.
    ///
    /// Text tokens are always pushable and never anything else.
    #[must_use]
    pub fn applies(&self, kind: Kind, rule: RuleKind) -> bool {
        match kind {
            Kind::Noun(noun) => self.contains(noun, rule),
            Kind::Text(_) => rule == RuleKind::Push,
        }
    }

    /// Nouns carrying `rule`, in declaration order.
    pub fn nouns(&self, rule: RuleKind) -> impl Iterator<Item = NounKind> + '_ {
        NounKind::ALL
            .into_iter()
            .filter(move |noun| self.contains(*noun, rule))
    }

    /// Every `(noun, rule)` pair, grouped You, Stop, Push, Win.
    pub fn iter(&self) -> impl Iterator<Item = (NounKind, RuleKind)> + '_ {
        DISPLAY_ORDER
            .into_iter()
            .flat_map(move |rule| self.nouns(rule).map(move |noun| (noun, rule)))
    }

    /// Total number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.iter().map(|set| set.len()).sum()
    }

    /// Check if no rule is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(|set| set.is_empty())
    }
}

/// Rule panel text: `Rules:` then one `"<Noun> is <Rule>"` line per rule.
impl std::fmt::Display for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Rules:")?;
        for (noun, rule) in self.iter() {
            write!(f, "\n{} is {}", noun, rule)?;
        }
        Ok(())
    }
}
