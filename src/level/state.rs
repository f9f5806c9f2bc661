//! The level aggregate: board, rules and the turn entry point.

use std::sync::Arc;

use log::debug;
use smallvec::SmallVec;

use super::layout::{Layout, PlacementKind};
use crate::core::{Direction, Entity, EntityId, Kind, Position, RuleKind, Word};
use crate::error::EngineResult;
use crate::grid::Grid;
use crate::movement::{self, Resolver};
use crate::rules::{self, Derivation, RuleSet};
use crate::visual::{Furniture, Presenter};

/// Result of one [`Level::p_move`].
#[derive(Clone, Debug, PartialEq)]
pub struct TurnOutcome {
    pub direction: Direction,

    /// `You` pieces that stepped, in the order they were tried.
    pub moved: SmallVec<[EntityId; 4]>,

    /// `You` pieces that could not step.
    pub blocked: SmallVec<[EntityId; 4]>,

    /// The derivation run after movement.
    pub derivation: Derivation,

    /// Some `You` piece now shares a cell with a `Win` piece.
    pub won: bool,
}

impl TurnOutcome {
    /// Check if anything moved.
    #[must_use]
    pub fn any_moved(&self) -> bool {
        !self.moved.is_empty()
    }
}

/// A playable board.
///
/// Owns the grid (and through it every entity) and the current rule set.
/// The registry of `is` tokens is fixed at construction; the tokens move
/// around the board but are never created or destroyed.
///
/// A level holds presenter handles but never the presenter itself. Every
/// operation that touches visuals takes the presenter as an argument, and a
/// level that is no longer needed must be given back through
/// [`Level::dispose`]. `Level` is deliberately not `Clone`; use
/// [`Level::snapshot`], which acquires fresh handles.
#[derive(Debug)]
pub struct Level {
    grid: Grid,
    rules: RuleSet,
    is_tokens: SmallVec<[EntityId; 8]>,
    furniture: Arc<Furniture>,
}

impl Level {
    /// Build a level from a layout and derive its initial rules.
    pub fn new(layout: &Layout, presenter: &mut dyn Presenter) -> EngineResult<Self> {
        layout.validate()?;

        let mut grid = Grid::new(layout.length, layout.width);
        let mut is_tokens = SmallVec::new();

        for placement in &layout.placements {
            let pos = placement.position();
            let entity = match placement.kind.noun() {
                Some(noun) => Entity::noun(grid.next_id(), noun, pos, placement.facing),
                None => {
                    debug_assert_eq!(placement.kind, PlacementKind::Text);
                    Entity::text(grid.next_id(), &placement.text, pos)
                }
            };
            let id = grid.insert(entity);

            let entity = grid.entity_mut(id);
            entity.visual = presenter.acquire_visual(
                entity.kind,
                entity.visual_position(),
                entity.facing.rotation(),
            );
            if entity.kind == Kind::Text(Word::Is) {
                is_tokens.push(id);
            }
        }

        let mut level = Self {
            grid,
            rules: RuleSet::new(),
            is_tokens,
            furniture: Arc::new(Furniture::default()),
        };
        level.update_rules(presenter);

        debug!(
            "built {}x{} level: {} entities, {} rules",
            layout.length,
            layout.width,
            level.grid.entity_count(),
            level.rules.len()
        );
        Ok(level)
    }

    /// Attach the level's scene dressing.
    #[must_use]
    pub fn with_furniture(mut self, furniture: Arc<Furniture>) -> Self {
        self.furniture = furniture;
        self
    }

    // === Accessors ===

    /// The board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Rules from the last derivation.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The `is` tokens, in creation order.
    #[must_use]
    pub fn is_tokens(&self) -> &[EntityId] {
        &self.is_tokens
    }

    /// Shared scene dressing.
    #[must_use]
    pub fn furniture(&self) -> &Arc<Furniture> {
        &self.furniture
    }

    /// Get an entity.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> &Entity {
        self.grid.entity(id)
    }

    /// Entities currently tagged `You`, in creation order.
    pub fn you_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.grid
            .entities()
            .filter(|e| self.rules.applies(e.kind, RuleKind::You))
            .map(|e| e.id)
    }

    // === Turn ===

    /// Move every `You` piece one cell in `dir`, then re-derive rules and
    /// check for a win.
    ///
    /// The set of movers is fixed before anything moves. Each mover is tried
    /// independently; one being blocked does not stop the others.
    pub fn p_move(&mut self, dir: Direction, presenter: &mut dyn Presenter) -> TurnOutcome {
        let movers: SmallVec<[EntityId; 4]> = self.you_entities().collect();
        let mut moved = SmallVec::new();
        let mut blocked = SmallVec::new();

        let journal = {
            let mut resolver = Resolver::new(&mut self.grid, &self.rules, dir);
            for &id in &movers {
                if resolver.try_move(id) {
                    moved.push(id);
                } else {
                    blocked.push(id);
                }
            }
            resolver.into_journal()
        };
        movement::replay(&journal, &self.grid, presenter);
        debug_assert!(self.grid.check_dense(), "stack slots out of order after move");

        let derivation = self.update_rules(presenter);
        let won = self.check_win();

        debug!(
            "turn {}: {} moved, {} blocked, won={}",
            dir,
            moved.len(),
            blocked.len(),
            won
        );
        TurnOutcome {
            direction: dir,
            moved,
            blocked,
            derivation,
            won,
        }
    }

    /// Move a single entity one cell in `dir`, pushing as needed.
    ///
    /// Rules are not re-derived.
    pub fn try_move(&mut self, id: EntityId, dir: Direction, presenter: &mut dyn Presenter) -> bool {
        let mut resolver = Resolver::new(&mut self.grid, &self.rules, dir);
        let moved = resolver.try_move(id);
        let journal = resolver.into_journal();
        movement::replay(&journal, &self.grid, presenter);
        moved
    }

    /// Check if an entity could step in `dir` under the current rules.
    #[must_use]
    pub fn can_move(&self, id: EntityId, dir: Direction) -> bool {
        let mut scratch = self.grid.clone();
        Resolver::new(&mut scratch, &self.rules, dir).can_move(id)
    }

    /// Check if `cell` blocks entry in `dir` under the current rules.
    #[must_use]
    pub fn contains_wall(&self, cell: Position, dir: Direction) -> bool {
        let mut scratch = self.grid.clone();
        Resolver::new(&mut scratch, &self.rules, dir).contains_wall(cell)
    }

    /// Rebuild the rule set from the board, applying transforms.
    pub fn update_rules(&mut self, presenter: &mut dyn Presenter) -> Derivation {
        let derivation = rules::derive(&mut self.grid, &self.is_tokens, presenter);
        self.rules = derivation.rules.clone();
        derivation
    }

    /// Check if any `You` piece shares a cell with a `Win` piece.
    #[must_use]
    pub fn check_win(&self) -> bool {
        self.you_entities().any(|id| {
            let pos = self.grid.entity(id).pos;
            self.grid
                .cell_at(pos)
                .iter()
                .any(|&other| self.rules.applies(self.grid.entity(other).kind, RuleKind::Win))
        })
    }

    // === Snapshots ===

    /// Copy the board for undo.
    ///
    /// Entities keep their IDs, kinds, cells, stack slots and facings; each
    /// gets a fresh presenter handle. Rules are left empty and furniture is
    /// shared.
    pub fn snapshot(&self, presenter: &mut dyn Presenter) -> Level {
        let mut grid = self.grid.clone();
        for index in 0..grid.entity_count() {
            let entity = grid.entity_mut(EntityId::new(index as u32));
            entity.visual = presenter.acquire_visual(
                entity.kind,
                entity.visual_position(),
                entity.facing.rotation(),
            );
        }

        Level {
            grid,
            rules: RuleSet::new(),
            is_tokens: self.is_tokens.clone(),
            furniture: Arc::clone(&self.furniture),
        }
    }

    /// Release every entity handle. Furniture is left alone.
    pub fn dispose(self, presenter: &mut dyn Presenter) {
        for entity in self.grid.entities() {
            presenter.dispose_visual(entity.visual);
        }
    }
}
