use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// Chebyshev distance: the number of king moves between two cells
    pub fn chebyshev(&self, other: &Cell) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx.max(dy)
    }

    /// True when `other` is one of the eight cells around `self`
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.chebyshev(other) == 1
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Cell {
        Cell::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

/// Neighbor offsets in expansion order: N, S, E, W, NE, NW, SE, SW.
/// y grows downward, so north is -1.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (1, 0),
    (-1, 0),
    (1, -1),
    (-1, -1),
    (1, 1),
    (-1, 1),
];

/// How the search interprets the grid extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// Rejects a coordinate only when it is below 0 or above the extent,
    /// so the extent itself counts as inside. Matches the behavior maps were
    /// tuned against.
    #[default]
    Reference,
    /// Valid coordinates are `[0, extent)`.
    Strict,
}

/// Grid extents. Nominal coordinates are `[0, x_extent) x [0, y_extent)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBounds {
    pub x_extent: i32,
    pub y_extent: i32,
}

impl GridBounds {
    pub fn new(x_extent: i32, y_extent: i32) -> Self {
        GridBounds { x_extent, y_extent }
    }

    /// Check whether a cell may be entered under the given policy
    pub fn contains(&self, cell: Cell, policy: BoundsPolicy) -> bool {
        if cell.x < 0 || cell.y < 0 {
            return false;
        }
        match policy {
            BoundsPolicy::Reference => cell.x <= self.x_extent && cell.y <= self.y_extent,
            BoundsPolicy::Strict => cell.x < self.x_extent && cell.y < self.y_extent,
        }
    }
}
