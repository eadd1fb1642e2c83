//! Reader for JSON tick logs
//!
//! Reads files written by `TickLog::save_to_file` and prints every event
//! followed by a summary.

use replanpath::tick_log::TickLog;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <tick_log.json>", args[0]);
        eprintln!("Prints a saved tick log with a summary");
        return ExitCode::FAILURE;
    }

    let log = match TickLog::load_from_file(&args[1]) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("Failed to read {}: {}", args[1], e);
            return ExitCode::FAILURE;
        }
    };

    log.print();

    println!("=== Summary ===");
    println!("{}", log.summary());

    ExitCode::SUCCESS
}
