use core::fmt;
use smallvec::{smallvec, SmallVec};

/// Offsets of the 4-neighbourhood in enumeration order: `+col`, `+row`, `-col`, `-row`.
/// The order decides which of several equally short paths is returned, never whether the
/// returned path is optimal.
pub const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// A position on the grid, addressed by row and column. Coordinates are signed so that
/// out-of-bounds positions (such as the neighbours of border cells) can be represented
/// and rejected by bounds checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// The [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) to `other`.
    /// Admissible and consistent when only axis-aligned unit steps are allowed.
    pub fn manhattan_distance(&self, other: &Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// The cell displaced by `(d_row, d_col)`.
    pub fn offset(&self, d_row: i32, d_col: i32) -> Cell {
        Cell::new(self.row + d_row, self.col + d_col)
    }

    /// The four axis-aligned neighbours in [NEUMANN_OFFSETS] order, without any bounds or
    /// passability filtering.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Cell; 4]> {
        let [a, b, c, d] = NEUMANN_OFFSETS;
        smallvec![
            self.offset(a.0, a.1),
            self.offset(b.0, b.1),
            self.offset(c.0, c.1),
            self.offset(d.0, d.1),
        ]
    }

    /// Whether `other` is exactly one unit step away along exactly one axis.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Cell {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
