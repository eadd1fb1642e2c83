use crate::grid::Cell;
use crate::pathfinding::Path;
use tracing::info;

/// Decides, once per tick, whether the committed path must be recomputed.
///
/// Remembers the path that was active the last time a replan was triggered.
/// That snapshot is only replaced when a rule fires, so intermediate paths
/// are never compared against.
#[derive(Debug, Clone, Default)]
pub struct ReplanMonitor {
    previous: Option<Path>,
}

impl ReplanMonitor {
    pub fn new() -> Self {
        ReplanMonitor { previous: None }
    }

    /// The path remembered from the last trigger, if any
    pub fn previous(&self) -> Option<&Path> {
        self.previous.as_ref()
    }

    pub fn should_replan(&mut self, current: &Path, adversary: Option<Cell>) -> bool {
        self.should_replan_among(current, adversary.as_slice())
    }

    /// Rules, checked in order:
    /// 1. the remembered path is shorter than `current` and none of the
    ///    dynamic obstacles sit on it any more
    /// 2. a dynamic obstacle sits on `current`
    pub fn should_replan_among(&mut self, current: &Path, dynamic: &[Cell]) -> bool {
        let shorter_path_reopened = self
            .previous
            .as_ref()
            .is_some_and(|prev| prev.len() < current.len() && !prev.contains_any(dynamic));

        if shorter_path_reopened {
            info!(
                previous = self.previous.as_ref().map_or(0, Path::len),
                current = current.len(),
                "shorter path may be open again, replanning"
            );
            self.previous = Some(current.clone());
            return true;
        }

        if current.contains_any(dynamic) {
            info!(?dynamic, steps = current.len(), "path blocked, replanning");
            self.previous = Some(current.clone());
            return true;
        }

        false
    }
}
