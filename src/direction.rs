use crate::error::PlanError;
use crate::grid::Cell;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compass direction of a single move. y grows downward, so north is -y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Map a one-cell delta to a direction
    pub fn from_delta(dx: i32, dy: i32) -> Result<Direction, PlanError> {
        match (dx, dy) {
            (1, 1) => Ok(Direction::SouthEast),
            (1, 0) => Ok(Direction::East),
            (1, -1) => Ok(Direction::NorthEast),
            (0, 1) => Ok(Direction::South),
            (0, -1) => Ok(Direction::North),
            (-1, 1) => Ok(Direction::SouthWest),
            (-1, 0) => Ok(Direction::West),
            (-1, -1) => Ok(Direction::NorthWest),
            _ => Err(PlanError::UnresolvableDirection { dx, dy }),
        }
    }

    /// Direction of the step from `from` to `to`
    pub fn between(from: Cell, to: Cell) -> Result<Direction, PlanError> {
        Direction::from_delta(to.x - from.x, to.y - from.y)
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Cell reached by stepping once from `cell`
    pub fn apply(self, cell: Cell) -> Cell {
        let (dx, dy) = self.delta();
        cell.offset(dx, dy)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "NORTH",
            Direction::NorthEast => "NORTHEAST",
            Direction::East => "EAST",
            Direction::SouthEast => "SOUTHEAST",
            Direction::South => "SOUTH",
            Direction::SouthWest => "SOUTHWEST",
            Direction::West => "WEST",
            Direction::NorthWest => "NORTHWEST",
        };
        f.write_str(name)
    }
}
