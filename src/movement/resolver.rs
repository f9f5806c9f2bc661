//! Move/push resolution for one direction.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{Direction, EntityId, Position, RuleKind};
use crate::grid::{Grid, Stack};
use crate::rules::RuleSet;
use crate::visual::{Presenter, VisualPosition};

/// A presenter update produced by a successful move.
#[derive(Clone, Debug, PartialEq)]
pub enum MoveEvent {
    /// The entity changed cell.
    Moved {
        entity: EntityId,
        at: VisualPosition,
        rotation: f32,
    },
    /// The entity's stack slot dropped because something below it left.
    Restacked { entity: EntityId, y: f32 },
}

/// Forward journalled events to the presenter.
pub fn replay(events: &[MoveEvent], grid: &Grid, presenter: &mut dyn Presenter) {
    for event in events {
        match *event {
            MoveEvent::Moved {
                entity,
                at,
                rotation,
            } => {
                let handle = grid.entity(entity).visual;
                presenter.move_visual(handle, at);
                presenter.face_visual(handle, rotation);
            }
            MoveEvent::Restacked { entity, y } => {
                presenter.set_visual_height(grid.entity(entity).visual, y);
            }
        }
    }
}

/// Resolves moves in a single direction against a fixed rule set.
///
/// ## Walls
///
/// A cell is a wall for direction `d` if it holds:
/// - a `Stop` piece that is not itself (`You` or `Push`) and able to move, or
/// - a `Push` piece (including `You`+`Push`) that cannot move.
///
/// Wall queries are pure and memoised per cell; the memo is dropped on
/// every mutation.
///
/// ## Pushing
///
/// The `Push`, non-`You` pieces of a destination cell move as a group:
/// all of them must be able to move, the cell beyond them is pushed once,
/// then they all step forward. `You` pieces are never pushed.
///
/// A failed [`Resolver::try_move`] leaves the grid exactly as it found it.
/// The grid is checkpointed (an O(1) persistent clone) before pushing and
/// restored if the push fails part way.
pub struct Resolver<'a> {
    grid: &'a mut Grid,
    rules: &'a RuleSet,
    dir: Direction,
    walls: FxHashMap<Position, bool>,
    journal: Vec<MoveEvent>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver for moves in `dir`.
    pub fn new(grid: &'a mut Grid, rules: &'a RuleSet, dir: Direction) -> Self {
        Self {
            grid,
            rules,
            dir,
            walls: FxHashMap::default(),
            journal: Vec::new(),
        }
    }

    /// Direction being resolved.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.dir
    }

    fn tagged(&self, id: EntityId, rule: RuleKind) -> bool {
        self.rules.applies(self.grid.entity(id).kind, rule)
    }

    fn pushable(&self, id: EntityId) -> bool {
        self.tagged(id, RuleKind::Push) && !self.tagged(id, RuleKind::You)
    }

    /// Check if an entity could step one cell in the resolver's direction.
    ///
    /// False at the board edge or when the target cell is a wall.
    pub fn can_move(&mut self, id: EntityId) -> bool {
        let pos = self.grid.entity(id).pos;
        match self.grid.neighbour(pos, self.dir) {
            Some(target) => !self.contains_wall(target),
            None => false,
        }
    }

    /// Check if `cell` blocks entry in the resolver's direction.
    pub fn contains_wall(&mut self, cell: Position) -> bool {
        if let Some(&wall) = self.walls.get(&cell) {
            return wall;
        }

        let occupants = Stack::from_slice(self.grid.cell_at(cell));
        let mut wall = false;
        for id in occupants {
            let you = self.tagged(id, RuleKind::You);
            let push = self.tagged(id, RuleKind::Push);
            let blocks = if self.tagged(id, RuleKind::Stop) {
                !((you || push) && self.can_move(id))
            } else if push {
                !self.can_move(id)
            } else {
                false
            };
            if blocks {
                wall = true;
                break;
            }
        }

        self.walls.insert(cell, wall);
        wall
    }

    /// Push whatever is in front of `id` out of its way.
    ///
    /// Succeeds trivially when nothing pushable is in front. On failure the
    /// grid may be partly modified; [`Resolver::try_move`] rolls it back.
    pub fn try_push(&mut self, id: EntityId) -> bool {
        let pos = self.grid.entity(id).pos;
        match self.grid.neighbour(pos, self.dir) {
            Some(target) => self.push_cell(target),
            None => false,
        }
    }

    fn push_cell(&mut self, cell: Position) -> bool {
        let pushed: SmallVec<[EntityId; 4]> = self
            .grid
            .cell_at(cell)
            .iter()
            .copied()
            .filter(|&id| self.pushable(id))
            .collect();
        if pushed.is_empty() {
            return true;
        }

        let Some(next) = self.grid.neighbour(cell, self.dir) else {
            return false;
        };
        for &id in &pushed {
            if !self.can_move(id) {
                return false;
            }
        }
        if !self.push_cell(next) {
            return false;
        }

        for &id in &pushed {
            self.relocate(id, next);
        }
        true
    }

    /// Move an entity one cell, pushing what is in front of it.
    ///
    /// Returns false, with the grid untouched, if the entity is blocked.
    pub fn try_move(&mut self, id: EntityId) -> bool {
        if !self.can_move(id) {
            return false;
        }
        let pos = self.grid.entity(id).pos;
        let Some(target) = self.grid.neighbour(pos, self.dir) else {
            return false;
        };

        let checkpoint = self.grid.clone();
        let mark = self.journal.len();
        if !self.try_push(id) {
            *self.grid = checkpoint;
            self.journal.truncate(mark);
            self.walls.clear();
            return false;
        }

        self.relocate(id, target);
        true
    }

    fn relocate(&mut self, id: EntityId, to: Position) {
        let restacked = self.grid.relocate(id, to);
        self.walls.clear();

        let entity = self.grid.entity_mut(id);
        entity.facing = self.dir;
        self.journal.push(MoveEvent::Moved {
            entity: id,
            at: entity.visual_position(),
            rotation: self.dir.rotation(),
        });
        for above in restacked {
            let y = self.grid.entity(above).visual_height();
            self.journal.push(MoveEvent::Restacked { entity: above, y });
        }
    }

    /// Presenter updates for every successful move so far.
    #[must_use]
    pub fn journal(&self) -> &[MoveEvent] {
        &self.journal
    }

    /// Finish resolving and hand back the journal.
    #[must_use]
    pub fn into_journal(self) -> Vec<MoveEvent> {
        self.journal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Entity, NounKind};

    fn place(grid: &mut Grid, noun: NounKind, x: usize, z: usize) -> EntityId {
        grid.insert(Entity::noun(grid.next_id(), noun, Position::new(x, z), Direction::PosX))
    }

    fn rules(pairs: &[(NounKind, RuleKind)]) -> RuleSet {
        let mut rules = RuleSet::new();
        for &(noun, rule) in pairs {
            rules.add(noun, rule);
        }
        rules
    }

    #[test]
    fn test_free_move() {
        let mut grid = Grid::new(3, 1);
        let baba = place(&mut grid, NounKind::Baba, 0, 0);
        let rules = rules(&[(NounKind::Baba, RuleKind::You)]);

        let mut resolver = Resolver::new(&mut grid, &rules, Direction::PosX);
        assert!(resolver.try_move(baba));
        assert_eq!(resolver.journal().len(), 1);

        assert_eq!(grid.entity(baba).pos, Position::new(1, 0));
    }

    #[test]
    fn test_edge_blocks() {
        let mut grid = Grid::new(3, 1);
        let baba = place(&mut grid, NounKind::Baba, 0, 0);
        let rules = rules(&[(NounKind::Baba, RuleKind::You)]);

        let mut resolver = Resolver::new(&mut grid, &rules, Direction::NegX);
        assert!(!resolver.can_move(baba));
        assert!(!resolver.try_move(baba));
        assert!(resolver.journal().is_empty());
    }

    #[test]
    fn test_stop_blocks() {
        let mut grid = Grid::new(3, 1);
        let baba = place(&mut grid, NounKind::Baba, 0, 0);
        place(&mut grid, NounKind::Wall, 1, 0);
        let rules = rules(&[(NounKind::Baba, RuleKind::You), (NounKind::Wall, RuleKind::Stop)]);

        let mut resolver = Resolver::new(&mut grid, &rules, Direction::PosX);
        assert!(resolver.contains_wall(Position::new(1, 0)));
        assert!(!resolver.try_move(baba));
    }

    #[test]
    fn test_untagged_pieces_are_walked_over() {
        let mut grid = Grid::new(3, 1);
        let baba = place(&mut grid, NounKind::Baba, 0, 0);
        let water = place(&mut grid, NounKind::Water, 1, 0);
        let rules = rules(&[(NounKind::Baba, RuleKind::You)]);

        let mut resolver = Resolver::new(&mut grid, &rules, Direction::PosX);
        assert!(resolver.try_move(baba));

        assert_eq!(grid.cell_at(Position::new(1, 0)), &[water, baba]);
        assert_eq!(grid.entity(baba).y, 1);
    }

    #[test]
    fn test_push_chain() {
        let mut grid = Grid::new(5, 1);
        let baba = place(&mut grid, NounKind::Baba, 0, 0);
        let a = place(&mut grid, NounKind::Rock, 1, 0);
        let b = place(&mut grid, NounKind::Rock, 2, 0);
        let rules = rules(&[(NounKind::Baba, RuleKind::You), (NounKind::Rock, RuleKind::Push)]);

        let mut resolver = Resolver::new(&mut grid, &rules, Direction::PosX);
        assert!(resolver.try_move(baba));

        assert_eq!(grid.entity(baba).pos.x, 1);
        assert_eq!(grid.entity(a).pos.x, 2);
        assert_eq!(grid.entity(b).pos.x, 3);
        assert!(grid.check_dense());
    }

    #[test]
    fn test_push_into_edge_fails_without_mutation() {
        let mut grid = Grid::new(3, 1);
        let baba = place(&mut grid, NounKind::Baba, 0, 0);
        let a = place(&mut grid, NounKind::Rock, 1, 0);
        let b = place(&mut grid, NounKind::Rock, 2, 0);
        let rules = rules(&[(NounKind::Baba, RuleKind::You), (NounKind::Rock, RuleKind::Push)]);

        let mut resolver = Resolver::new(&mut grid, &rules, Direction::PosX);
        assert!(!resolver.try_move(baba));
        assert!(resolver.journal().is_empty());

        assert_eq!(grid.entity(baba).pos.x, 0);
        assert_eq!(grid.entity(a).pos.x, 1);
        assert_eq!(grid.entity(b).pos.x, 2);
    }

    #[test]
    fn test_stacked_pushables_move_together() {
        let mut grid = Grid::new(5, 1);
        let baba = place(&mut grid, NounKind::Baba, 0, 0);
        let a = place(&mut grid, NounKind::Rock, 1, 0);
        let b = place(&mut grid, NounKind::Rock, 1, 0);
        let c = place(&mut grid, NounKind::Rock, 2, 0);
        let rules = rules(&[(NounKind::Baba, RuleKind::You), (NounKind::Rock, RuleKind::Push)]);

        let mut resolver = Resolver::new(&mut grid, &rules, Direction::PosX);
        assert!(resolver.try_move(baba));

        assert_eq!(grid.cell_at(Position::new(2, 0)), &[a, b]);
        assert_eq!(grid.cell_at(Position::new(3, 0)), &[c]);
        assert_eq!(grid.entity(baba).pos.x, 1);
        assert!(grid.check_dense());
    }

    #[test]
    fn test_you_and_push_piece_is_not_pushed() {
        let mut grid = Grid::new(4, 1);
        let baba = place(&mut grid, NounKind::Baba, 0, 0);
        let other = place(&mut grid, NounKind::Baba, 1, 0);
        let rules = rules(&[(NounKind::Baba, RuleKind::You), (NounKind::Baba, RuleKind::Push)]);

        let mut resolver = Resolver::new(&mut grid, &rules, Direction::PosX);
        // `other` could move, so it is no wall, but it is not pushed either
        assert!(resolver.try_move(baba));

        assert_eq!(grid.cell_at(Position::new(1, 0)), &[other, baba]);
    }

    #[test]
    fn test_stuck_you_and_push_piece_is_a_wall() {
        let mut grid = Grid::new(2, 1);
        let baba = place(&mut grid, NounKind::Baba, 0, 0);
        place(&mut grid, NounKind::Baba, 1, 0);
        let rules = rules(&[(NounKind::Baba, RuleKind::You), (NounKind::Baba, RuleKind::Push)]);

        let mut resolver = Resolver::new(&mut grid, &rules, Direction::PosX);
        assert!(!resolver.try_move(baba));
    }

    #[test]
    fn test_mutual_stops_block_everything() {
        let mut grid = Grid::new(4, 1);
        let baba = place(&mut grid, NounKind::Baba, 0, 0);
        place(&mut grid, NounKind::Rock, 1, 0);
        place(&mut grid, NounKind::Wall, 1, 0);
        let rules = rules(&[
            (NounKind::Baba, RuleKind::You),
            (NounKind::Rock, RuleKind::Stop),
            (NounKind::Wall, RuleKind::Stop),
        ]);

        let mut resolver = Resolver::new(&mut grid, &rules, Direction::PosX);
        assert!(!resolver.try_move(baba));
    }

    #[test]
    fn test_stop_and_push_piece_is_pushed() {
        let mut grid = Grid::new(3, 1);
        let baba = place(&mut grid, NounKind::Baba, 0, 0);
        let rock = place(&mut grid, NounKind::Rock, 1, 0);
        let rules = rules(&[
            (NounKind::Baba, RuleKind::You),
            (NounKind::Rock, RuleKind::Stop),
            (NounKind::Rock, RuleKind::Push),
        ]);

        let mut resolver = Resolver::new(&mut grid, &rules, Direction::PosX);
        assert!(resolver.try_move(baba));
        assert_eq!(grid.entity(rock).pos.x, 2);
    }

    #[test]
    fn test_text_is_pushed_without_rules() {
        let mut grid = Grid::new(3, 1);
        let baba = place(&mut grid, NounKind::Baba, 0, 0);
        let word = grid.insert(Entity::text(grid.next_id(), "Flag", Position::new(1, 0)));
        let rules = rules(&[(NounKind::Baba, RuleKind::You)]);

        let mut resolver = Resolver::new(&mut grid, &rules, Direction::PosX);
        assert!(resolver.try_move(baba));
        assert_eq!(grid.entity(word).pos.x, 2);
    }

    #[test]
    fn test_restack_events() {
        let mut grid = Grid::new(2, 1);
        let baba = place(&mut grid, NounKind::Baba, 0, 0);
        let flag = place(&mut grid, NounKind::Flag, 0, 0);
        let rules = rules(&[(NounKind::Baba, RuleKind::You)]);

        let mut resolver = Resolver::new(&mut grid, &rules, Direction::PosX);
        assert!(resolver.try_move(baba));
        let journal = resolver.into_journal();

        assert_eq!(journal.len(), 2);
        assert!(matches!(journal[0], MoveEvent::Moved { entity, .. } if entity == baba));
        match journal[1] {
            MoveEvent::Restacked { entity, y } => {
                assert_eq!(entity, flag);
                assert!((y - NounKind::Flag.visual_offset()).abs() < 1e-6);
            }
            _ => panic!("expected a restack"),
        }
        assert_eq!(grid.entity(flag).y, 0);
    }

    #[test]
    fn test_facing_follows_move() {
        let mut grid = Grid::new(1, 3);
        let baba = place(&mut grid, NounKind::Baba, 0, 0);
        let rules = rules(&[(NounKind::Baba, RuleKind::You)]);

        let mut resolver = Resolver::new(&mut grid, &rules, Direction::PosZ);
        assert!(resolver.try_move(baba));
        assert_eq!(grid.entity(baba).facing, Direction::PosZ);
    }
}
