//! # grid_astar
//!
//! Shortest paths on a uniform-cost grid with blocked cells using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm). Movement is restricted to the four
//! axis-aligned neighbours and every step costs the same, so the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) is an admissible and
//! consistent heuristic and returned paths are optimal. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! ```
//! use grid_astar::{find_path, Cell};
//!
//! let grid = [
//!     [0, 0, 0, 0],
//!     [0, 1, 1, 0],
//!     [0, 0, 0, 0],
//!     [0, 1, 0, 0],
//! ];
//! let path = find_path(&grid, Cell::new(0, 0), Cell::new(3, 3)).unwrap().unwrap();
//! assert_eq!(path.len(), 7);
//! ```
pub mod astar_grid;
pub mod cell;
pub mod error;
pub mod pathing_grid;
pub mod solver;

pub use cell::Cell;
pub use error::{Endpoint, GridError};
pub use pathing_grid::PathingGrid;
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, is_valid_path, GridSolver};

use num_traits::Zero;

/// Cost of a single step between neighbouring cells.
pub const C: i32 = 1;

/// Inline capacity for neighbour lists: at most four neighbours on a 4-grid.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Computes a shortest path on a matrix of flags where zero marks a passable cell and any
/// other value a blocked one.
///
/// Returns the cells from `start` to `goal`, both included, or `Ok(None)` if the goal cannot
/// be reached, including when either end is blocked. A matrix that is empty or not
/// rectangular, or an endpoint outside it, is reported as a [GridError] before searching.
pub fn find_path<T, R>(rows: &[R], start: Cell, goal: Cell) -> Result<Option<Vec<Cell>>, GridError>
where
    T: Zero,
    R: AsRef<[T]>,
{
    let grid = PathingGrid::from_rows(rows)?;
    AstarSolver::new().get_path_single_goal(&grid, start, goal)
}
