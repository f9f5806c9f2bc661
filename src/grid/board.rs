//! Grid storage and stacking.

use im::Vector;
use smallvec::SmallVec;

use crate::core::{Direction, Entity, EntityId, NounKind, Position};

/// Ordered occupants of one cell, bottom first.
pub type Stack = SmallVec<[EntityId; 4]>;

/// Entities whose stack slot changed because a piece below them left.
pub type Restacked = SmallVec<[EntityId; 4]>;

/// A `length × width` board of entity stacks.
///
/// ## Example
///
/// ```
/// use rule_blocks::core::{Direction, Entity, NounKind, Position};
/// use rule_blocks::grid::Grid;
///
/// let mut grid = Grid::new(4, 4);
/// let at = Position::new(1, 1);
///
/// let rock = grid.insert(Entity::noun(grid.next_id(), NounKind::Rock, at, Direction::PosX));
/// let flag = grid.insert(Entity::noun(grid.next_id(), NounKind::Flag, at, Direction::PosX));
///
/// assert_eq!(grid.cell_at(at), &[rock, flag]);
/// assert_eq!(grid.entity(flag).y, 1);
///
/// // Removing the bottom piece drops the one above it into slot 0
/// let restacked = grid.remove(rock);
/// assert_eq!(restacked.as_slice(), &[flag]);
/// assert_eq!(grid.entity(flag).y, 0);
/// ```
#[derive(Clone, Debug)]
pub struct Grid {
    length: usize,
    width: usize,
    cells: Vector<Stack>,
    entities: Vector<Entity>,
}

impl Grid {
    /// Create an empty board.
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(length: usize, width: usize) -> Self {
        assert!(length > 0 && width > 0, "Grid dimensions must be non-zero");

        Self {
            length,
            width,
            cells: std::iter::repeat(Stack::new()).take(length * width).collect(),
            entities: Vector::new(),
        }
    }

    /// Extent along `x`.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Extent along `z`.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Check if signed coordinates lie on the board.
    #[must_use]
    pub fn in_bounds(&self, x: isize, z: isize) -> bool {
        x >= 0 && z >= 0 && (x as usize) < self.length && (z as usize) < self.width
    }

    /// Check if a position lies on the board.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.length && pos.z < self.width
    }

    /// The cell next to `pos` in `dir`, if it is on the board.
    #[must_use]
    pub fn neighbour(&self, pos: Position, dir: Direction) -> Option<Position> {
        pos.step(dir, self.length, self.width)
    }

    fn cell_index(&self, pos: Position) -> usize {
        debug_assert!(self.contains(pos), "{} is off the board", pos);
        pos.x * self.width + pos.z
    }

    /// Occupants of a cell, bottom first.
    #[must_use]
    pub fn cell_at(&self, pos: Position) -> &[EntityId] {
        &self.cells[self.cell_index(pos)]
    }

    /// Slot the next piece pushed onto `pos` will take.
    #[must_use]
    pub fn next_y(&self, pos: Position) -> usize {
        self.cells[self.cell_index(pos)].len()
    }

    // === Entities ===

    /// ID the next inserted entity will receive.
    #[must_use]
    pub fn next_id(&self) -> EntityId {
        EntityId::new(self.entities.len() as u32)
    }

    /// Add a new entity on top of the cell at `entity.pos`.
    ///
    /// The entity's `id` is overwritten with [`Grid::next_id`].
    pub fn insert(&mut self, mut entity: Entity) -> EntityId {
        let id = self.next_id();
        let pos = entity.pos;
        entity.id = id;
        self.entities.push_back(entity);
        self.push(id, pos);
        id
    }

    /// Get an entity. Panics on an ID this grid never issued.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.index()]
    }

    /// Get a mutable entity. Panics on an ID this grid never issued.
    ///
    /// Position and stack slot must only be changed through
    /// [`Grid::push`]/[`Grid::remove`].
    pub fn entity_mut(&mut self, id: EntityId) -> &mut Entity {
        &mut self.entities[id.index()]
    }

    /// All entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter()
    }

    /// IDs of all noun pieces of `noun`, in creation order.
    pub fn entities_of(&self, noun: NounKind) -> impl Iterator<Item = EntityId> + '_ {
        self.entities
            .iter()
            .filter(move |e| e.kind.noun() == Some(noun))
            .map(|e| e.id)
    }

    /// Number of entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // === Stacking ===

    /// Put an entity on top of the stack at `pos`.
    ///
    /// The entity must not currently be in any cell (fresh from
    /// [`Grid::insert`] or just taken out with [`Grid::remove`]).
    pub fn push(&mut self, id: EntityId, pos: Position) {
        let idx = self.cell_index(pos);
        let y = self.cells[idx].len();
        self.cells[idx].push(id);

        let entity = &mut self.entities[id.index()];
        entity.pos = pos;
        entity.y = y;
    }

    /// Take an entity out of its cell and close the gap.
    ///
    /// Returns the entities above it, whose slots each dropped by one.
    pub fn remove(&mut self, id: EntityId) -> Restacked {
        let (pos, y) = {
            let entity = &self.entities[id.index()];
            (entity.pos, entity.y)
        };
        let idx = self.cell_index(pos);

        let stack = &mut self.cells[idx];
        let slot = if stack.get(y) == Some(&id) {
            y
        } else {
            // Slot out of date; only possible if the invariant was already broken.
            debug_assert!(false, "{} not at slot {} of {}", id, y, pos);
            match stack.iter().position(|&e| e == id) {
                Some(slot) => slot,
                None => return Restacked::new(),
            }
        };
        stack.remove(slot);

        let restacked: Restacked = stack[slot..].iter().copied().collect();
        for (offset, &above) in restacked.iter().enumerate() {
            self.entities[above.index()].y = slot + offset;
        }
        restacked
    }

    /// Move an entity to the top of another cell.
    ///
    /// Returns the entities re-slotted in the cell it left.
    pub fn relocate(&mut self, id: EntityId, to: Position) -> Restacked {
        let restacked = self.remove(id);
        self.push(id, to);
        restacked
    }

    /// Iterate over every non-empty cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Position, &[EntityId])> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, stack)| !stack.is_empty())
            .map(move |(idx, stack)| (Position::new(idx / width, idx % width), stack.as_slice()))
    }

    /// Check the dense-index invariant and cell/entity agreement.
    ///
    /// Every cell's occupants have slots exactly `0..n` in stack order, each
    /// records that cell as its position, and every entity sits in exactly
    /// one cell. Used by debug assertions and tests.
    #[must_use]
    pub fn check_dense(&self) -> bool {
        let mut seen = 0usize;
        for (pos, stack) in self.occupied_cells() {
            for (slot, &id) in stack.iter().enumerate() {
                let Some(entity) = self.entities.get(id.index()) else {
                    return false;
                };
                if entity.pos != pos || entity.y != slot {
                    return false;
                }
                seen += 1;
            }
        }
        seen == self.entities.len()
    }
}
