use smallvec::SmallVec;

use crate::{cell::Cell, pathing_grid::PathingGrid, solver::GridSolver, C, N_SMALLVEC_SIZE};

/// Upper bound on heuristic values, leaving headroom for the path cost added on top.
const MAX_HEURISTIC: i32 = i32::MAX / 2;

/// A* guided by the Manhattan distance.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Multiplier applied to the heuristic. At `1.0` paths are optimal; larger values expand
    /// fewer nodes but may return longer paths.
    pub heuristic_factor: f32,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }

    pub fn with_heuristic_factor(heuristic_factor: f32) -> AstarSolver {
        AstarSolver { heuristic_factor }
    }
}

impl Default for AstarSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GridSolver for AstarSolver {
    type Successors = SmallVec<[(Cell, i32); N_SMALLVEC_SIZE]>;

    fn successors(&self, grid: &PathingGrid, node: &Cell) -> Self::Successors {
        grid.neighborhood_points_and_cost(node)
    }

    /// Manhattan distance in step costs, times the heuristic factor, clamped to
    /// `0..=MAX_HEURISTIC`. A non-finite factor saturates or collapses to zero.
    fn heuristic(&self, p1: &Cell, p2: &Cell) -> i32 {
        let scaled = ((p1.manhattan_distance(p2) * C) as f32 * self.heuristic_factor) as i32;
        scaled.clamp(0, MAX_HEURISTIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Endpoint, GridError};
    use crate::solver::is_valid_path;

    /// Number of steps on a shortest path, found by breadth-first search.
    fn bfs_steps(grid: &PathingGrid, start: Cell, goal: Cell) -> Option<usize> {
        let mut seen = vec![start];
        let mut frontier = vec![start];
        let mut steps = 0;
        while !frontier.is_empty() {
            if frontier.contains(&goal) {
                return Some(steps);
            }
            let mut next = Vec::new();
            for p in frontier {
                for n in grid.neighbours(p) {
                    if !seen.contains(&n) {
                        seen.push(n);
                        next.push(n);
                    }
                }
            }
            frontier = next;
            steps += 1;
        }
        None
    }

    fn scenario_grid() -> PathingGrid {
        PathingGrid::from_rows(&[
            [0u8, 0, 0, 0],
            [0, 1, 1, 0],
            [0, 0, 0, 0],
            [0, 1, 0, 0],
        ])
        .unwrap()
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let pathing_grid = PathingGrid::new(1, 1, false);
        let solver = AstarSolver::new();
        let start = Cell::new(0, 0);
        let path = solver
            .get_path_single_goal(&pathing_grid, start, start)
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![start]);
    }

    /// Asserts that the optimal 4 step solution is found around a central obstacle.
    #[test]
    fn solve_simple_problem() {
        let mut pathing_grid = PathingGrid::new(3, 3, false);
        pathing_grid.set(Cell::new(1, 1), true);
        pathing_grid.update();
        let solver = AstarSolver::new();
        let start = Cell::new(0, 0);
        let end = Cell::new(2, 2);
        let path = solver
            .get_path_single_goal(&pathing_grid, start, end)
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 5);
        assert!(is_valid_path(&pathing_grid, &path));
        assert_eq!(solver.get_path_cost(&path), 4);
    }

    #[test]
    fn solve_scenario_grid() {
        let grid = scenario_grid();
        let solver = AstarSolver::new();
        let start = Cell::new(0, 0);
        let goal = Cell::new(3, 3);
        let path = solver
            .get_path_single_goal(&grid, start, goal)
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert!(is_valid_path(&grid, &path));
    }

    #[test]
    fn blocked_goal_has_no_path() {
        let mut grid = scenario_grid();
        grid.set(Cell::new(3, 3), true);
        let solver = AstarSolver::new();
        let path = solver
            .get_path_single_goal(&grid, Cell::new(0, 0), Cell::new(3, 3))
            .unwrap();
        assert!(path.is_none());
        let path = solver
            .get_path_single_goal(&grid, Cell::new(1, 1), Cell::new(0, 0))
            .unwrap();
        assert!(path.is_none());
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let grid = scenario_grid();
        let solver = AstarSolver::new();
        let err = solver
            .get_path_single_goal(&grid, Cell::new(-1, 0), Cell::new(3, 3))
            .unwrap_err();
        assert!(matches!(
            err,
            GridError::OutOfBounds {
                endpoint: Endpoint::Start,
                ..
            }
        ));
        let err = solver
            .get_path_single_goal(&grid, Cell::new(0, 0), Cell::new(0, 4))
            .unwrap_err();
        assert!(matches!(
            err,
            GridError::OutOfBounds {
                endpoint: Endpoint::Goal,
                ..
            }
        ));
    }

    /// The search must still report a missing path when stale components cannot rule it out.
    #[test]
    fn wall_with_dirty_components() {
        let mut grid = PathingGrid::new(3, 3, false);
        for row in 0..3 {
            grid.set(Cell::new(row, 1), true);
        }
        assert!(grid.components_dirty);
        let solver = AstarSolver::new();
        let path = solver
            .get_path_single_goal(&grid, Cell::new(0, 0), Cell::new(2, 2))
            .unwrap();
        assert!(path.is_none());
    }

    #[test]
    fn approximate_path_to_blocked_goal() {
        let mut grid = PathingGrid::new(3, 3, false);
        grid.set(Cell::new(2, 2), true);
        grid.update();
        let solver = AstarSolver::new();
        let path = solver
            .get_path_single_goal_approximate(&grid, Cell::new(0, 0), Cell::new(2, 2))
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.last().unwrap().manhattan_distance(&Cell::new(2, 2)), 1);
        assert!(is_valid_path(&grid, &path));
    }

    #[test]
    fn test_multiple_goals() {
        let mut pathing_grid = PathingGrid::new(5, 5, false);
        pathing_grid.set(Cell::new(1, 1), true);
        pathing_grid.update();
        let solver = AstarSolver::new();
        let start = Cell::new(0, 0);
        let goals = [Cell::new(4, 4), Cell::new(3, 3)];
        let (selected_goal, path) = solver
            .get_path_multiple_goals(&pathing_grid, start, &goals)
            .unwrap()
            .unwrap();
        assert_eq!(selected_goal, Cell::new(3, 3));
        assert_eq!(path.len(), 7);
        assert!(solver
            .get_path_multiple_goals(&pathing_grid, start, &[])
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_complex() {
        let mut pathing_grid = PathingGrid::new(10, 10, false);
        for cell in [(1, 1), (0, 5), (5, 0), (8, 8)] {
            pathing_grid.set(Cell::from(cell), true);
        }
        pathing_grid.update();
        let solver = AstarSolver::new();
        let path = solver
            .get_path_single_goal(&pathing_grid, Cell::new(0, 0), Cell::new(7, 7))
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 15);
    }

    #[test]
    fn weighted_heuristic_returns_valid_path() {
        let grid = PathingGrid::from_rows(&[
            [0u8, 0, 0, 0, 0, 0],
            [0, 1, 1, 1, 1, 0],
            [0, 0, 0, 0, 1, 0],
            [1, 1, 1, 0, 1, 0],
            [0, 0, 0, 0, 0, 0],
        ])
        .unwrap();
        let start = Cell::new(0, 0);
        let goal = Cell::new(4, 0);
        let optimal = bfs_steps(&grid, start, goal).unwrap();

        let path = AstarSolver::new()
            .get_path_single_goal(&grid, start, goal)
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), optimal + 1);

        let weighted = AstarSolver::with_heuristic_factor(1.5)
            .get_path_single_goal(&grid, start, goal)
            .unwrap()
            .unwrap();
        assert_eq!(weighted.first(), Some(&start));
        assert_eq!(weighted.last(), Some(&goal));
        assert!(is_valid_path(&grid, &weighted));
        assert!(weighted.len() >= path.len());
    }

    /// Huge or non-finite factors must not overflow the priority computation.
    #[test]
    fn extreme_heuristic_factor_is_clamped() {
        let grid = PathingGrid::new(3, 3, false);
        let start = Cell::new(0, 0);
        let goal = Cell::new(2, 2);
        for factor in [1e10, f32::INFINITY, f32::NAN, -3.0] {
            let solver = AstarSolver::with_heuristic_factor(factor);
            let h = solver.heuristic(&start, &goal);
            assert!((0..=MAX_HEURISTIC).contains(&h));
            let path = solver
                .get_path_single_goal(&grid, start, goal)
                .unwrap()
                .unwrap();
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&goal));
            assert!(is_valid_path(&grid, &path));
        }
    }
}
