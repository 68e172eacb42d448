//! Reads an instance from stdin, prints the digit plan to stdout, and a JSON
//! stats line to stderr.

use std::io;
use std::process::ExitCode;

use beamline_harness::input::Problem;
use beamline_harness::{solve, DEFAULT_BEAM_WIDTH, DEFAULT_SEED};

const USAGE: &str = "usage: solve [--width N] [--seed N] < instance.txt";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("solve: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut width = DEFAULT_BEAM_WIDTH;
    let mut seed = DEFAULT_SEED;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--width" => {
                let value = args.next().ok_or(USAGE)?;
                width = value.parse()?;
            }
            "--seed" => {
                let value = args.next().ok_or(USAGE)?;
                seed = value.parse()?;
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => return Err(USAGE.into()),
        }
    }

    let problem = Problem::from_reader(io::stdin().lock())?;
    let solution = solve(&problem, width, seed)?;
    println!("{}", solution.plan);

    let stats = solution.stats;
    let report = serde_json::json!({
        "targets": problem.targets.len(),
        "plan_ticks": solution.plan.len(),
        "turns": stats.turns,
        "candidates_pushed": stats.candidates_pushed,
        "duplicates_merged": stats.duplicates_merged,
        "pruned_by_cost": stats.pruned_by_cost,
        "evictions": stats.evictions,
        "settled_len": stats.settled_len,
        "tour_len": stats.tour_len,
    });
    eprintln!("{report}");
    Ok(())
}
