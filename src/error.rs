use thiserror::Error;

use crate::grid::Cell;

/// Failures surfaced by the planner and the tick controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The frontier emptied before the goal was reached.
    #[error("no path from {start} to {goal}")]
    NoPathFound { start: Cell, goal: Cell },

    /// The committed path is exhausted but the mover is not next to the target.
    #[error("invalid plan: mover at {mover} cannot attack target at {target}")]
    InvalidPlanState { mover: Cell, target: Cell },

    /// A waypoint delta outside the eight unit moves.
    #[error("could not resolve a direction for delta ({dx}, {dy})")]
    UnresolvableDirection { dx: i32, dy: i32 },
}

/// Errors raised while reading a map layout.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("map has no rows")]
    Empty,

    #[error("row {row} has width {width}, expected {expected}")]
    RaggedRow {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("unknown glyph '{glyph}' at {cell}")]
    UnknownGlyph { glyph: char, cell: Cell },

    #[error("row {row} is blank")]
    BlankRow { row: usize },

    #[error("map has more than one '{0}'")]
    Duplicate(char),

    #[error("map has no '{0}'")]
    Missing(char),
}

/// Errors raised while loading `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
