//! Best-first search core shared by every solver. Discovered nodes live in an
//! insertion-ordered arena keyed by node; parents are arena indices, so reconstructing a path
//! is a walk over indices rather than over owning links.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Arena index of the root, which has no parent.
const NO_PARENT: usize = usize::MAX;

/// Open set entry. Several entries may refer to the same arena index when a cheaper route to
/// a node was found after it was pushed; the outdated ones are skipped when popped.
struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first. Among equal estimates the node with the largest
        // cost so far (closest to the goal) wins, then the earliest discovered one.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Per-node search state stored in the arena.
#[derive(Clone, Copy, Debug)]
struct NodeRecord<C> {
    parent: usize,
    /// Lowest cost from the start seen so far.
    cost: C,
    /// Set once the node has been popped and expanded.
    closed: bool,
}

/// Walks parent indices from `goal_index` back to the root and returns the nodes in
/// start-to-goal order.
fn reverse_path<N, C>(parents: &FxIndexMap<N, NodeRecord<C>>, goal_index: usize) -> Vec<N>
where
    N: Clone,
{
    let mut path: Vec<N> = std::iter::successors(Some(goal_index), |&i| {
        parents
            .get_index(i)
            .map(|(_, record)| record.parent)
            .filter(|&p| p != NO_PARENT)
    })
    .filter_map(|i| parents.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// A* from `start` until a node satisfying `success` is popped. Returns the path including
/// both ends together with its cost, or [None] once the open set runs empty.
///
/// `successors` yields neighbouring nodes with their (non-negative) move cost and
/// `heuristic` estimates the remaining cost. With an admissible heuristic the returned path
/// is optimal. Expanded nodes are closed and never reopened.
pub fn astar_grid<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        index: 0,
    });
    let mut parents: FxIndexMap<N, NodeRecord<C>> = FxIndexMap::default();
    parents.insert(
        start.clone(),
        NodeRecord {
            parent: NO_PARENT,
            cost: Zero::zero(),
            closed: false,
        },
    );
    let mut expanded = 0usize;
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let Some((node, record)) = parents.get_index_mut(index) else {
                continue;
            };
            // Outdated duplicate of a node that has since been reached more cheaply.
            if record.closed || cost > record.cost {
                continue;
            }
            if success(node) {
                let path = reverse_path(&parents, index);
                debug!(
                    "Path of {} nodes found after expanding {} of {} discovered nodes",
                    path.len(),
                    expanded,
                    parents.len()
                );
                return Some((path, cost));
            }
            record.closed = true;
            expanded += 1;
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert(NodeRecord {
                        parent: index,
                        cost: new_cost,
                        closed: false,
                    });
                }
                Occupied(mut e) => {
                    let record = e.get_mut();
                    if record.closed || record.cost <= new_cost {
                        continue;
                    }
                    record.parent = index;
                    record.cost = new_cost;
                    h = heuristic(e.key());
                    n = e.index();
                }
            }

            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }
    debug!(
        "Open set exhausted after expanding {} of {} discovered nodes",
        expanded,
        parents.len()
    );
    None
}
