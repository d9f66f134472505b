use crate::cell::Cell;
use crate::error::{Endpoint, GridError};
use crate::{C, N_SMALLVEC_SIZE};
use core::fmt;
use log::info;
use num_traits::Zero;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [PathingGrid] stores which cells are blocked ([true]) or passable ([false]) in row-major
/// order, together with connected components in a [UnionFind] structure so that queries
/// between disconnected cells can be answered without flood-filling the grid.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    rows: usize,
    cols: usize,
    blocked: Vec<bool>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid {
            rows: 0,
            cols: 0,
            blocked: Vec::new(),
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }
}

impl PathingGrid {
    /// Creates a `rows` x `cols` grid with every cell set to `blocked`. Components are
    /// generated up front.
    pub fn new(rows: usize, cols: usize, blocked: bool) -> PathingGrid {
        let mut grid = PathingGrid {
            rows,
            cols,
            blocked: vec![blocked; rows * cols],
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    /// Builds a grid from a row-major matrix of flags where zero marks a passable cell and any
    /// other value a blocked one. Rejects matrices without cells and matrices whose rows
    /// differ in length.
    pub fn from_rows<T, R>(rows: &[R]) -> Result<PathingGrid, GridError>
    where
        T: Zero,
        R: AsRef<[T]>,
    {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        let mut blocked = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(GridError::RaggedRow {
                    row,
                    len: values.len(),
                    expected: cols,
                });
            }
            blocked.extend(values.iter().map(|v| !v.is_zero()));
        }
        let mut grid = PathingGrid {
            rows: rows.len(),
            cols,
            blocked,
            components: UnionFind::new(rows.len() * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }

    /// Fails with [GridError::OutOfBounds] if `cell` does not lie on the grid.
    pub fn check_in_bounds(&self, cell: Cell, endpoint: Endpoint) -> Result<(), GridError> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                endpoint,
                cell,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn ix(&self, cell: Cell) -> usize {
        debug_assert!(self.in_bounds(cell));
        cell.row as usize * self.cols + cell.col as usize
    }

    /// Whether `cell` is blocked. Out-of-bounds cells count as blocked.
    pub fn get(&self, cell: Cell) -> bool {
        !self.in_bounds(cell) || self.blocked[self.ix(cell)]
    }

    /// Updates a cell. Joins newly connected components when a cell is opened and flags the
    /// components as dirty when closing a cell may split a component in two. Out-of-bounds
    /// cells are ignored.
    pub fn set(&mut self, cell: Cell, blocked: bool) {
        if !self.in_bounds(cell) {
            return;
        }
        let ix = self.ix(cell);
        let was_blocked = self.blocked[ix];
        self.blocked[ix] = blocked;
        if blocked {
            if !was_blocked {
                self.components_dirty = true;
            }
        } else {
            for n in self.neighbours(cell) {
                let n_ix = self.ix(n);
                self.components.union(ix, n_ix);
            }
        }
    }

    /// Whether a walker may stand on `cell`: it lies on the grid and is not blocked.
    pub fn can_move_to(&self, cell: Cell) -> bool {
        !self.get(cell)
    }

    /// Passable axis-aligned neighbours of `cell`, in the fixed order of
    /// [Cell::neumann_neighborhood].
    pub fn neighbours(&self, cell: Cell) -> SmallVec<[Cell; N_SMALLVEC_SIZE]> {
        cell.neumann_neighborhood()
            .into_iter()
            .filter(|p| self.can_move_to(*p))
            .collect()
    }

    /// Passable neighbours paired with the uniform step cost [C].
    pub fn neighborhood_points_and_cost(
        &self,
        cell: &Cell,
    ) -> SmallVec<[(Cell, i32); N_SMALLVEC_SIZE]> {
        self.neighbours(*cell).into_iter().map(|p| (p, C)).collect()
    }

    /// Retrieves the component id `cell` belongs to, or [None] if it lies outside the grid.
    pub fn get_component(&self, cell: &Cell) -> Option<usize> {
        self.in_bounds(*cell).then(|| self.components.find(self.ix(*cell)))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Out-of-bounds cells are
    /// unreachable.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            !self.components.equiv(self.ix(*start), self.ix(*goal))
        } else {
            true
        }
    }

    /// Checks if every passable neighbour of the goal is on a different component than the
    /// start.
    pub fn neighbours_unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        if self.in_bounds(*start) {
            let start_ix = self.ix(*start);
            !self
                .neighbours(*goal)
                .iter()
                .any(|p| self.components.equiv(start_ix, self.ix(*p)))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours to the same
    /// components. Each cell only needs to be joined with the cells below and to the right.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let cell = Cell::new(row, col);
                if self.get(cell) {
                    continue;
                }
                let parent_ix = self.ix(cell);
                for n in [cell.offset(0, 1), cell.offset(1, 0)] {
                    if self.can_move_to(n) {
                        let n_ix = self.ix(n);
                        self.components.union(parent_ix, n_ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for row in 0..self.rows as i32 {
            let values = (0..self.cols as i32)
                .map(|col| self.get(Cell::new(row, col)) as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}
