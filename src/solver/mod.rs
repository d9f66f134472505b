use crate::astar_grid::astar_grid;
use crate::cell::Cell;
use crate::error::{Endpoint, GridError};
use crate::pathing_grid::PathingGrid;
use crate::C;
use itertools::Itertools;
use log::{info, warn};

pub mod astar;
pub mod dijkstra;

/// Checks that `path` is non-empty, only visits passable cells and moves exactly one unit
/// along exactly one axis per step.
pub fn is_valid_path(grid: &PathingGrid, path: &[Cell]) -> bool {
    !path.is_empty()
        && path.iter().all(|p| grid.can_move_to(*p))
        && path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
}

/// A search strategy on a [PathingGrid]. Implementors supply the heuristic and successor
/// generation; path queries are provided on top of the shared search core.
///
/// All queries validate their endpoints before searching: an endpoint outside the grid is a
/// [GridError]. A blocked endpoint or a goal in another connected component yields
/// `Ok(None)`.
pub trait GridSolver {
    type Successors: IntoIterator<Item = (Cell, i32)>;

    fn heuristic(&self, p1: &Cell, p2: &Cell) -> i32;

    fn successors(&self, grid: &PathingGrid, node: &Cell) -> Self::Successors;

    /// Total cost of following `path`, with [C] per step.
    fn get_path_cost(&self, path: &[Cell]) -> i32 {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| a.manhattan_distance(b) * C)
            .sum()
    }

    /// Computes a shortest path from `start` to `goal`, both included.
    fn get_path_single_goal(
        &self,
        grid: &PathingGrid,
        start: Cell,
        goal: Cell,
    ) -> Result<Option<Vec<Cell>>, GridError> {
        grid.check_in_bounds(start, Endpoint::Start)?;
        grid.check_in_bounds(goal, Endpoint::Goal)?;
        if !grid.can_move_to(start) || !grid.can_move_to(goal) {
            info!("{} or {} is blocked", start, goal);
            return Ok(None);
        }
        // Check if start and goal are on the same connected component.
        if !grid.components_dirty && grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Ok(None);
        }
        info!("Computing path from {} to {}", start, goal);
        let path = astar_grid(
            &start,
            |node| self.successors(grid, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        )
        .map(|(v, _c)| v);
        if path.is_none() && !grid.components_dirty {
            warn!("Reachable goal could not be pathed to, are the components correct?");
        }
        Ok(path)
    }

    /// Like [get_path_single_goal](Self::get_path_single_goal), but stops at the goal or at
    /// any cell next to it. Useful when the goal itself is blocked.
    fn get_path_single_goal_approximate(
        &self,
        grid: &PathingGrid,
        start: Cell,
        goal: Cell,
    ) -> Result<Option<Vec<Cell>>, GridError> {
        grid.check_in_bounds(start, Endpoint::Start)?;
        grid.check_in_bounds(goal, Endpoint::Goal)?;
        if !grid.can_move_to(start) {
            info!("{} is blocked", start);
            return Ok(None);
        }
        // Check if start and the goal or one of its neighbours are on the same component.
        if !grid.components_dirty
            && grid.unreachable(&start, &goal)
            && grid.neighbours_unreachable(&start, &goal)
        {
            info!("No neighbours of {} are reachable from {}", goal, start);
            return Ok(None);
        }
        Ok(astar_grid(
            &start,
            |node| self.successors(grid, node),
            |point| (self.heuristic(point, &goal) - C).max(0),
            |point| point.manhattan_distance(&goal) <= 1,
        )
        .map(|(v, _c)| v))
    }

    /// Computes a path from the start to the nearest of the given goals and returns the
    /// selected goal in addition to the found path. Goals that are blocked or not reachable
    /// are skipped.
    fn get_path_multiple_goals(
        &self,
        grid: &PathingGrid,
        start: Cell,
        goals: &[Cell],
    ) -> Result<Option<(Cell, Vec<Cell>)>, GridError> {
        grid.check_in_bounds(start, Endpoint::Start)?;
        for goal in goals {
            grid.check_in_bounds(*goal, Endpoint::Goal)?;
        }
        if !grid.can_move_to(start) {
            info!("{} is blocked", start);
            return Ok(None);
        }
        let goals = goals
            .iter()
            .copied()
            .filter(|g| grid.can_move_to(*g))
            .filter(|g| grid.components_dirty || grid.reachable(&start, g))
            .collect::<Vec<Cell>>();
        if goals.is_empty() {
            info!("None of the goals are reachable from {}", start);
            return Ok(None);
        }
        let result = astar_grid(
            &start,
            |node| self.successors(grid, node),
            |point| {
                goals
                    .iter()
                    .map(|g| self.heuristic(point, g))
                    .min()
                    .unwrap_or(0)
            },
            |point| goals.contains(point),
        );
        Ok(result.and_then(|(v, _c)| v.last().copied().map(|goal| (goal, v))))
    }
}
