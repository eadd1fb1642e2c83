use replanpath::config::Config;
use replanpath::pathfinding::format_path;
use replanpath::{Agent, Direction, GridMap, Path, PlanError, Planner, TickInput};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <map.txt>", args[0]);
        eprintln!("Plans a path from F to a cell next to H, avoiding x/# and E");
        return ExitCode::FAILURE;
    }

    // The subscriber goes in first so a bad config.toml is reported.
    let loaded = Config::load();
    tracing_subscriber::fmt()
        .with_max_level(loaded.as_ref().map_or(tracing::Level::INFO, Config::log_level))
        .init();

    let config = match loaded {
        Ok(config) => {
            info!(policy = ?config.search.bounds_policy, "Configuration ready");
            config
        }
        Err(e) => {
            error!("Invalid config.toml: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let map = match GridMap::load(&args[1]) {
        Ok(map) => map,
        Err(e) => {
            error!("Failed to load map {}: {}", args[1], e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        bounds = ?map.bounds,
        policy = ?config.search.bounds_policy,
        "Loaded map {}",
        args[1]
    );

    let mut agent = Agent::new(Planner::new(config.search.bounds_policy));
    if config.logging.enable_tick_log {
        agent = agent.with_tick_log();
    }

    let input = TickInput {
        turn: 0,
        bounds: map.bounds,
        obstacles: &map.obstacles,
        mover: map.mover,
        target: Some(map.target),
        adversary: map.adversary,
    };

    let outcome = match agent.initial_step(&input) {
        Ok(outcome) => outcome,
        Err(e @ PlanError::NoPathFound { .. }) => {
            println!("No available path: {}", e);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // The first step was already taken off the path by the controller.
    let walk: Vec<_> = agent
        .next_waypoint()
        .into_iter()
        .chain(agent.path().iter().copied())
        .collect();

    println!("Path: {}", format_path(&Path::from_walk(walk.iter().copied())));
    let mut from = map.mover;
    for step in &walk {
        match Direction::between(from, *step) {
            Ok(direction) => println!("  {} -> {}  {}", from, step, direction),
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
        from = *step;
    }
    println!("First command: {:?}", outcome.command);

    if let Some(log) = agent.tick_log() {
        if let Err(e) = log.save_to_file(&config.logging.tick_log_path) {
            error!("Failed to save tick log: {}", e);
        } else {
            info!("Tick log written to {}", config.logging.tick_log_path);
        }
    }

    ExitCode::SUCCESS
}
