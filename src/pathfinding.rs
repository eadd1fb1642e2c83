use crate::error::PlanError;
use crate::grid::{BoundsPolicy, Cell, GridBounds, NEIGHBOR_OFFSETS};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use tracing::{debug, trace};

/// Waypoints from the first step after the start to the last step before
/// the goal. Stored as a stack: the next step to take is on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    // Reverse walk order; `last()` is the next step.
    stack: Vec<Cell>,
}

impl Path {
    pub fn new() -> Self {
        Path { stack: Vec::new() }
    }

    /// Build a path from cells in walk order (first step first)
    pub fn from_walk(steps: impl IntoIterator<Item = Cell>) -> Self {
        let mut stack: Vec<Cell> = steps.into_iter().collect();
        stack.reverse();
        Path { stack }
    }

    /// Remove and return the next step
    pub fn pop_next(&mut self) -> Option<Cell> {
        self.stack.pop()
    }

    pub fn peek_next(&self) -> Option<Cell> {
        self.stack.last().copied()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.stack.contains(cell)
    }

    /// True if any of `cells` lies on the remaining path
    pub fn contains_any(&self, cells: &[Cell]) -> bool {
        cells.iter().any(|c| self.contains(c))
    }

    /// Iterate remaining steps in walk order
    pub fn iter(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.stack.iter().rev()
    }

    /// Remaining steps in walk order
    pub fn to_vec(&self) -> Vec<Cell> {
        self.iter().copied().collect()
    }

    /// Last step of the path, the one that ends next to the goal
    pub fn last_step(&self) -> Option<Cell> {
        self.stack.first().copied()
    }
}

/// A node in the search arena. The partial path ending here is recovered by
/// following `parent` links back to the start.
#[derive(Debug, Clone)]
struct SearchNode {
    cell: Cell,
    parent: Option<usize>,
    /// Number of cells in the partial path, start included
    length: u32,
}

/// Frontier entry: an arena index ordered by priority, then insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
struct FrontierEntry {
    priority: u32,
    seq: u64,
    node: usize,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Best-first planner over an 8-connected grid.
///
/// Every step costs 1 regardless of direction, and the heuristic is the
/// Chebyshev distance to the goal. A cell is suppressed as a successor once
/// it is closed or is already the tail of an open frontier entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner {
    pub policy: BoundsPolicy,
}

impl Planner {
    pub fn new(policy: BoundsPolicy) -> Self {
        Planner { policy }
    }

    /// Find a path from `start` to a cell adjacent to `goal`.
    ///
    /// `adversary` is treated as impassable for this call only.
    pub fn find_path(
        &self,
        start: Cell,
        goal: Cell,
        bounds: GridBounds,
        obstacles: &HashSet<Cell>,
        adversary: Option<Cell>,
    ) -> Result<Path, PlanError> {
        self.find_path_among(start, goal, bounds, obstacles, adversary.as_slice())
    }

    /// Same as [`Planner::find_path`] with any number of dynamic obstacles
    pub fn find_path_among(
        &self,
        start: Cell,
        goal: Cell,
        bounds: GridBounds,
        obstacles: &HashSet<Cell>,
        dynamic: &[Cell],
    ) -> Result<Path, PlanError> {
        debug!(%start, %goal, ?bounds, obstacles = obstacles.len(), ?dynamic, "planning");

        let mut arena: Vec<SearchNode> = Vec::new();
        let mut frontier: BinaryHeap<FrontierEntry> = BinaryHeap::new();
        let mut closed: HashSet<Cell> = HashSet::new();
        let mut open_tails: HashSet<Cell> = HashSet::new();
        let mut seq: u64 = 0;

        arena.push(SearchNode {
            cell: start,
            parent: None,
            length: 1,
        });
        frontier.push(FrontierEntry {
            priority: 1 + heuristic(start, goal),
            seq,
            node: 0,
        });
        open_tails.insert(start);

        let mut expansions = 0usize;
        while let Some(entry) = frontier.pop() {
            let current = arena[entry.node].clone();
            open_tails.remove(&current.cell);

            if current.cell == goal {
                let path = reconstruct(&arena, entry.node);
                debug!(
                    expansions,
                    nodes = arena.len(),
                    steps = path.len(),
                    "path found"
                );
                return Ok(path);
            }

            expansions += 1;
            closed.insert(current.cell);
            trace!(cell = %current.cell, length = current.length, priority = entry.priority, "expand");

            for (dx, dy) in NEIGHBOR_OFFSETS {
                let next = current.cell.offset(dx, dy);
                if !bounds.contains(next, self.policy)
                    || closed.contains(&next)
                    || obstacles.contains(&next)
                    || dynamic.contains(&next)
                    || open_tails.contains(&next)
                {
                    continue;
                }

                let length = current.length + 1;
                arena.push(SearchNode {
                    cell: next,
                    parent: Some(entry.node),
                    length,
                });
                seq += 1;
                frontier.push(FrontierEntry {
                    priority: length + heuristic(next, goal),
                    seq,
                    node: arena.len() - 1,
                });
                open_tails.insert(next);
            }
        }

        debug!(expansions, "frontier exhausted");
        Err(PlanError::NoPathFound { start, goal })
    }
}

/// Plan with the default bounds policy
pub fn find_path(
    start: Cell,
    goal: Cell,
    bounds: GridBounds,
    obstacles: &HashSet<Cell>,
    adversary: Option<Cell>,
) -> Result<Path, PlanError> {
    Planner::default().find_path(start, goal, bounds, obstacles, adversary)
}

fn heuristic(cell: Cell, goal: Cell) -> u32 {
    cell.chebyshev(&goal).unsigned_abs()
}

/// Walk parent links from the goal node. The goal and start cells are left out.
fn reconstruct(arena: &[SearchNode], goal_node: usize) -> Path {
    // Collected goal-side first, which is already stack order.
    let mut stack = Vec::new();
    let mut cursor = arena[goal_node].parent;
    while let Some(index) = cursor {
        let node = &arena[index];
        if node.parent.is_none() {
            break;
        }
        stack.push(node.cell);
        cursor = node.parent;
    }
    Path { stack }
}

/// Format path for display
pub fn format_path(path: &Path) -> String {
    if path.is_empty() {
        return "No steps".to_string();
    }

    path.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
