use crate::direction::Direction;
use crate::error::PlanError;
use crate::grid::{Cell, GridBounds};
use crate::pathfinding::{format_path, Path, Planner};
use crate::replan::ReplanMonitor;
use crate::tick_log::{TickEvent, TickLog};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// What the host reports at the start of a tick
#[derive(Debug, Clone)]
pub struct TickInput<'a> {
    pub turn: u32,
    pub bounds: GridBounds,
    pub obstacles: &'a HashSet<Cell>,
    pub mover: Cell,
    /// `None` once the target has been destroyed
    pub target: Option<Cell>,
    /// `None` if there is no adversary, or it was destroyed
    pub adversary: Option<Cell>,
}

/// A single command for the mover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    Attack,
}

/// What the controller hands back to the host for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub command: Option<Command>,
    pub replanned: bool,
    /// Set when the tick was a reported no-op
    pub diagnostic: Option<PlanError>,
    /// Set once the target is gone
    pub finished: bool,
}

/// Timing totals over an episode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanStats {
    pub turns: u32,
    /// Successful planner runs
    pub plans: u32,
    /// Planner runs that ended in an error
    pub failed_plans: u32,
    pub replans: u32,
    pub planning: Duration,
    /// Tick time spent outside the planner
    pub execution: Duration,
}

impl PlanStats {
    pub fn total(&self) -> Duration {
        self.planning + self.execution
    }
}

/// Tick controller: owns the committed path and decides each tick whether to
/// replan, move toward the next waypoint, or attack.
pub struct Agent {
    planner: Planner,
    monitor: ReplanMonitor,
    path: Path,
    next_waypoint: Option<Cell>,
    stats: PlanStats,
    tick_log: Option<TickLog>,
    finished: bool,
}

impl Agent {
    pub fn new(planner: Planner) -> Self {
        Agent {
            planner,
            monitor: ReplanMonitor::new(),
            path: Path::new(),
            next_waypoint: None,
            stats: PlanStats::default(),
            tick_log: None,
            finished: false,
        }
    }

    /// Record every tick decision into a [`TickLog`]
    pub fn with_tick_log(mut self) -> Self {
        self.tick_log = Some(TickLog::new());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn next_waypoint(&self) -> Option<Cell> {
        self.next_waypoint
    }

    pub fn stats(&self) -> &PlanStats {
        &self.stats
    }

    pub fn tick_log(&self) -> Option<&TickLog> {
        self.tick_log.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Plan from scratch, then act on the same tick
    pub fn initial_step(&mut self, input: &TickInput) -> Result<TickOutcome, PlanError> {
        if let Some(target) = input.target {
            let mut elapsed = Duration::ZERO;
            self.path = self.plan(input, target, &mut elapsed)?;
            self.next_waypoint = None;

            info!(steps = self.path.len(), path = %format_path(&self.path), "initial plan");
            self.record(
                input.turn,
                TickEvent::Planned {
                    from: input.mover,
                    goal: target,
                    steps: self.path.len(),
                    elapsed_us: elapsed.as_micros() as u64,
                },
            );
        }

        self.middle_step(input)
    }

    /// Tick time outside the planner goes to `execution`, also when the
    /// tick fails
    pub fn middle_step(&mut self, input: &TickInput) -> Result<TickOutcome, PlanError> {
        let started = Instant::now();

        let Some(target) = input.target else {
            self.terminal_step(input.turn);
            return Ok(TickOutcome {
                finished: true,
                ..TickOutcome::default()
            });
        };

        let mut planning = Duration::ZERO;
        let result = self.act(input, target, &mut planning);
        self.stats.execution += started.elapsed().saturating_sub(planning);
        result
    }

    fn act(
        &mut self,
        input: &TickInput,
        target: Cell,
        planning: &mut Duration,
    ) -> Result<TickOutcome, PlanError> {
        let mut outcome = TickOutcome::default();

        if self.monitor.should_replan(&self.path, input.adversary) {
            self.path = self.plan(input, target, planning)?;
            self.stats.replans += 1;
            // The old waypoint belonged to the discarded plan.
            self.next_waypoint = None;
            outcome.replanned = true;

            self.record(
                input.turn,
                TickEvent::Replanned {
                    from: input.mover,
                    goal: target,
                    steps: self.path.len(),
                    elapsed_us: planning.as_micros() as u64,
                },
            );
        }

        if !self.path.is_empty() && self.next_waypoint.map_or(true, |w| w == input.mover) {
            self.next_waypoint = self.path.pop_next();
            if let Some(next) = self.next_waypoint {
                debug!(turn = input.turn, %next, remaining = self.path.len(), "moving to next waypoint");
            }
        }

        match self.next_waypoint {
            Some(next) if next != input.mover => {
                let direction = Direction::between(input.mover, next)?;
                outcome.command = Some(Command::Move(direction));
                self.record(
                    input.turn,
                    TickEvent::Moved {
                        from: input.mover,
                        to: next,
                        direction,
                    },
                );
            }
            _ => {
                if input.mover.chebyshev(&target) > 1 {
                    let err = PlanError::InvalidPlanState {
                        mover: input.mover,
                        target,
                    };
                    error!(turn = input.turn, %err, "cannot attack target");
                    outcome.diagnostic = Some(err);
                    self.record(
                        input.turn,
                        TickEvent::InvalidPlan {
                            mover: input.mover,
                            target,
                        },
                    );
                } else {
                    debug!(turn = input.turn, %target, "attacking target");
                    outcome.command = Some(Command::Attack);
                    self.record(
                        input.turn,
                        TickEvent::Attacked {
                            mover: input.mover,
                            target,
                        },
                    );
                }
            }
        }

        Ok(outcome)
    }

    /// Close the episode and report totals
    pub fn terminal_step(&mut self, turn: u32) -> PlanStats {
        if !self.finished {
            self.finished = true;
            self.stats.turns = turn;
            info!(
                turns = turn,
                plans = self.stats.plans,
                failed_plans = self.stats.failed_plans,
                replans = self.stats.replans,
                planning_secs = self.stats.planning.as_secs_f64(),
                execution_secs = self.stats.execution.as_secs_f64(),
                total_secs = self.stats.total().as_secs_f64(),
                "episode finished"
            );
            self.record(turn, TickEvent::Finished { turns: turn });
        }
        self.stats.clone()
    }

    /// Run the planner, adding its time to `spent` and to the totals
    fn plan(&mut self, input: &TickInput, target: Cell, spent: &mut Duration) -> Result<Path, PlanError> {
        let started = Instant::now();
        let result = self.planner.find_path(
            input.mover,
            target,
            input.bounds,
            input.obstacles,
            input.adversary,
        );
        let elapsed = started.elapsed();
        *spent += elapsed;
        self.stats.planning += elapsed;

        match &result {
            Ok(_) => self.stats.plans += 1,
            Err(err) => {
                self.stats.failed_plans += 1;
                error!(turn = input.turn, %err, "planning failed");
            }
        }
        result
    }

    fn record(&mut self, turn: u32, event: TickEvent) {
        if let Some(log) = self.tick_log.as_mut() {
            log.log(turn, event);
        }
    }
}
