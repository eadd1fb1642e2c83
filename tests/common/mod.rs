#![allow(dead_code)]

use replanpath::{Agent, Cell, Command, GridBounds, GridMap, Path, PlanError, TickInput};
use std::collections::{HashSet, VecDeque};

pub fn cells(coords: &[(i32, i32)]) -> HashSet<Cell> {
    coords.iter().map(|&c| Cell::from(c)).collect()
}

/// Render a map with the path drawn on it, for assertion messages
pub fn visualize_path(map: &GridMap, path: &Path) -> String {
    let mut result = format!("\nPath: {} steps\n", path.len());
    for y in 0..map.bounds.y_extent {
        for x in 0..map.bounds.x_extent {
            let cell = Cell::new(x, y);
            let symbol = if cell == map.mover {
                'F'
            } else if cell == map.target {
                'H'
            } else if Some(cell) == map.adversary {
                'E'
            } else if path.contains(&cell) {
                '*'
            } else if map.obstacles.contains(&cell) {
                'x'
            } else {
                '.'
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}

/// Check every property a returned path must have. Panics with a rendering
/// of the map on failure.
pub fn assert_valid_path(map: &GridMap, path: &Path) {
    let picture = visualize_path(map, path);
    let mut from = map.mover;
    for step in path.iter() {
        assert_eq!(from.chebyshev(step), 1, "non-adjacent step {} -> {}{}", from, step, picture);
        assert!(!map.obstacles.contains(step), "path crosses obstacle {}{}", step, picture);
        assert_ne!(Some(*step), map.adversary, "path crosses adversary{}", picture);
        assert_ne!(*step, map.target, "path enters the goal cell{}", picture);
        from = *step;
    }
    assert_eq!(from.chebyshev(&map.target), 1, "path ends away from goal{}", picture);
}

/// Cells reachable from the mover by 8-connected moves inside `[0, extent)`,
/// avoiding obstacles and the adversary
pub fn reachable(map: &GridMap) -> HashSet<Cell> {
    let mut seen = HashSet::from([map.mover]);
    let mut queue = VecDeque::from([map.mover]);
    while let Some(cell) = queue.pop_front() {
        for dx in -1..=1 {
            for dy in -1..=1 {
                let next = cell.offset(dx, dy);
                let inside = next.x >= 0
                    && next.y >= 0
                    && next.x < map.bounds.x_extent
                    && next.y < map.bounds.y_extent;
                if inside
                    && !map.obstacles.contains(&next)
                    && Some(next) != map.adversary
                    && seen.insert(next)
                {
                    queue.push_back(next);
                }
            }
        }
    }
    seen
}

/// Small deterministic generator for scattering obstacles
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Lcg(seed)
    }

    pub fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    pub fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

/// Random map with roughly `density` percent of cells blocked
pub fn random_map(seed: u64, width: i32, height: i32, density: u64) -> GridMap {
    let mut rng = Lcg::new(seed);
    let mover = Cell::new(rng.below(width as u64) as i32, rng.below(height as u64) as i32);
    let mut target = mover;
    while target == mover {
        target = Cell::new(rng.below(width as u64) as i32, rng.below(height as u64) as i32);
    }

    let mut obstacles = HashSet::new();
    for y in 0..height {
        for x in 0..width {
            let cell = Cell::new(x, y);
            if cell != mover && cell != target && rng.below(100) < density {
                obstacles.insert(cell);
            }
        }
    }

    GridMap {
        bounds: GridBounds::new(width, height),
        obstacles,
        mover,
        target,
        adversary: None,
    }
}

/// Mirror a map left-right
pub fn flip_horizontal(map: &GridMap) -> GridMap {
    let w = map.bounds.x_extent;
    let flip = |c: Cell| Cell::new(w - 1 - c.x, c.y);
    GridMap {
        bounds: map.bounds,
        obstacles: map.obstacles.iter().map(|&c| flip(c)).collect(),
        mover: flip(map.mover),
        target: flip(map.target),
        adversary: map.adversary.map(flip),
    }
}

/// Mirror a map top-bottom
pub fn flip_vertical(map: &GridMap) -> GridMap {
    let h = map.bounds.y_extent;
    let flip = |c: Cell| Cell::new(c.x, h - 1 - c.y);
    GridMap {
        bounds: map.bounds,
        obstacles: map.obstacles.iter().map(|&c| flip(c)).collect(),
        mover: flip(map.mover),
        target: flip(map.target),
        adversary: map.adversary.map(flip),
    }
}

#[derive(Debug)]
pub struct EpisodeResult {
    /// Turn on which the attack command was issued
    pub attacked_on: Option<u32>,
    pub final_mover: Cell,
    /// Cells the mover occupied, start included
    pub visited: Vec<Cell>,
    pub replans: u32,
    pub plans: u32,
    pub diagnostics: Vec<PlanError>,
}

/// Host loop: feeds the agent one tick at a time and applies its move
/// commands. A move into an obstacle or the adversary leaves the mover in
/// place. Stops at the first attack or after `max_turns`.
pub fn run_episode(
    agent: &mut Agent,
    map: &GridMap,
    adversary_at: impl Fn(u32) -> Option<Cell>,
    max_turns: u32,
) -> Result<EpisodeResult, PlanError> {
    let mut mover = map.mover;
    let mut visited = vec![mover];
    let mut diagnostics = Vec::new();
    let mut attacked_on = None;

    for turn in 0..max_turns {
        let adversary = adversary_at(turn);
        let input = TickInput {
            turn,
            bounds: map.bounds,
            obstacles: &map.obstacles,
            mover,
            target: Some(map.target),
            adversary,
        };

        let outcome = if turn == 0 {
            agent.initial_step(&input)?
        } else {
            agent.middle_step(&input)?
        };

        if let Some(diagnostic) = outcome.diagnostic {
            diagnostics.push(diagnostic);
        }

        match outcome.command {
            Some(Command::Move(direction)) => {
                let next = direction.apply(mover);
                if !map.obstacles.contains(&next) && Some(next) != adversary {
                    mover = next;
                    visited.push(mover);
                }
            }
            Some(Command::Attack) => {
                attacked_on = Some(turn);
                break;
            }
            None => {}
        }
    }

    Ok(EpisodeResult {
        attacked_on,
        final_mover: mover,
        visited,
        replans: agent.stats().replans,
        plans: agent.stats().plans,
        diagnostics,
    })
}
