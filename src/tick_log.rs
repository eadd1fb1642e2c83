use crate::direction::Direction;
use crate::grid::Cell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

/// Something the controller did on a tick
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TickEvent {
    /// First plan of the episode
    Planned { from: Cell, goal: Cell, steps: usize, elapsed_us: u64 },
    /// The replan monitor fired and a fresh path replaced the committed one
    Replanned { from: Cell, goal: Cell, steps: usize, elapsed_us: u64 },
    /// Move command toward the next waypoint
    Moved { from: Cell, to: Cell, direction: Direction },
    /// Path exhausted next to the target
    Attacked { mover: Cell, target: Cell },
    /// Path exhausted but the target is out of reach
    InvalidPlan { mover: Cell, target: Cell },
    /// Target gone, episode over
    Finished { turns: u32 },
}

/// Logged event with timestamp and turn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedTick {
    /// Milliseconds since the log was created
    pub timestamp_ms: u64,
    pub turn: u32,
    pub event: TickEvent,
}

/// Per-episode event log
pub struct TickLog {
    start_time: Instant,
    entries: Vec<LoggedTick>,
}

impl Default for TickLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TickLog {
    pub fn new() -> Self {
        TickLog {
            start_time: Instant::now(),
            entries: Vec::new(),
        }
    }

    /// Wrap entries read back from disk
    pub fn from_entries(entries: Vec<LoggedTick>) -> Self {
        TickLog {
            start_time: Instant::now(),
            entries,
        }
    }

    /// Log an event with the current timestamp
    pub fn log(&mut self, turn: u32, event: TickEvent) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.entries.push(LoggedTick {
            timestamp_ms,
            turn,
            event,
        });
    }

    pub fn entries(&self) -> &[LoggedTick] {
        &self.entries
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let entries: Vec<LoggedTick> = serde_json::from_str(&json)?;
        Ok(TickLog::from_entries(entries))
    }

    /// Print log to console
    pub fn print(&self) {
        println!("\n=== Tick Log ({} events) ===", self.entries.len());
        for (i, logged) in self.entries.iter().enumerate() {
            println!(
                "[{:6}ms] #{:3} turn {:4} {:?}",
                logged.timestamp_ms,
                i + 1,
                logged.turn,
                logged.event
            );
        }
        println!("=== End of Log ===\n");
    }

    /// Count events by kind
    pub fn counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for logged in &self.entries {
            let kind = match logged.event {
                TickEvent::Planned { .. } => "planned",
                TickEvent::Replanned { .. } => "replanned",
                TickEvent::Moved { .. } => "moved",
                TickEvent::Attacked { .. } => "attacked",
                TickEvent::InvalidPlan { .. } => "invalid_plan",
                TickEvent::Finished { .. } => "finished",
            };
            *counts.entry(kind).or_insert(0) += 1;
        }
        counts
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut planning_us = 0u64;
        for logged in &self.entries {
            if let TickEvent::Planned { elapsed_us, .. } | TickEvent::Replanned { elapsed_us, .. } =
                logged.event
            {
                planning_us += elapsed_us;
            }
        }

        let counts = self.counts();
        let count = |kind: &str| counts.get(kind).copied().unwrap_or(0);
        let last_turn = self.entries.last().map_or(0, |l| l.turn);

        format!(
            "Turns: {}\n\
             Total Events: {}\n\
             Plans: {} initial, {} replans ({}us planning)\n\
             Commands: {} moves, {} attacks, {} invalid",
            last_turn,
            self.entries.len(),
            count("planned"),
            count("replanned"),
            planning_us,
            count("moved"),
            count("attacked"),
            count("invalid_plan"),
        )
    }
}
