use smallvec::SmallVec;

use crate::{cell::Cell, pathing_grid::PathingGrid, solver::GridSolver, N_SMALLVEC_SIZE};

/// Uniform-cost search: A* without a heuristic. Expands nodes in order of distance from the
/// start, which makes it a useful baseline for the guided solvers.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Successors = SmallVec<[(Cell, i32); N_SMALLVEC_SIZE]>;

    fn successors(&self, grid: &PathingGrid, node: &Cell) -> Self::Successors {
        grid.neighborhood_points_and_cost(node)
    }

    fn heuristic(&self, _: &Cell, _: &Cell) -> i32 {
        0
    }
}
