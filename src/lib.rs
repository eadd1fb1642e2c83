pub mod agent;
pub mod config;
pub mod direction;
pub mod error;
pub mod grid;
pub mod map;
pub mod pathfinding;
pub mod replan;
pub mod tick_log;

pub use agent::{Agent, Command, PlanStats, TickInput, TickOutcome};
pub use direction::Direction;
pub use error::PlanError;
pub use grid::{BoundsPolicy, Cell, GridBounds};
pub use map::GridMap;
pub use pathfinding::{find_path, Path, Planner};
pub use replan::ReplanMonitor;
