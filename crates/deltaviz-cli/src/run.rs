#![forbid(unsafe_code)]

//! Subcommand bodies. Each builds an engine from the scenario arguments
//! and drives it through the public API only; the sleep in `animate` is
//! the host-side cadence the engine itself deliberately does not own.

use std::thread;
use std::time::Duration;

use deltaviz_core::{DiffEngine, Tick};
use tracing::info;

use crate::cli::AnimateArgs;
use crate::error::Result;
use crate::scenario::ScenarioArgs;

pub fn run_compute(args: &ScenarioArgs) -> Result<()> {
    let engine = args.build_engine()?;
    print_scenario(&engine);
    println!("diff    = {}", format_row(&engine.diff_array(None)));
    println!("final   = {}", format_row(&engine.final_array()));
    Ok(())
}

pub fn run_animate(args: &AnimateArgs) -> Result<()> {
    let mut engine = args.scenario.build_engine()?;
    print_scenario(&engine);
    println!("diff    = {}", format_row(&engine.diff_array(None)));

    let delay = Duration::from_millis(args.delay_ms);
    engine.start_animated_compute();
    info!(size = engine.size(), delay_ms = args.delay_ms, "animated run started");
    loop {
        match engine.tick() {
            Tick::Advanced { index } => {
                println!(
                    "cell {index:>3} committed: {}",
                    format_row(engine.partial_final_array())
                );
            }
            Tick::Finished => {
                println!("final   = {}", format_row(engine.partial_final_array()));
                break;
            }
            Tick::Idle => break,
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    Ok(())
}

pub fn run_replay(args: &ScenarioArgs) -> Result<()> {
    let mut engine = args.build_engine()?;
    print_scenario(&engine);
    let count = engine.update_count();
    let initial = engine.replay_snapshot();
    println!("k=0/{count}  diff = {}  final = {}", format_row(&initial.diff), format_row(&initial.final_values));
    for _ in 0..count {
        let snapshot = engine.replay_step_forward();
        println!(
            "k={}/{count}  diff = {}  final = {}",
            snapshot.cursor,
            format_row(&snapshot.diff),
            format_row(&snapshot.final_values)
        );
    }
    Ok(())
}

fn print_scenario(engine: &DiffEngine) {
    println!("size    = {}", engine.size());
    println!("initial = {}", format_row(engine.initial_array()));
    for update in engine.updates() {
        println!("update {} : [{}, {}] += {}", update.id, update.l, update.r, update.val);
    }
}

fn format_row(values: &[i64]) -> String {
    let cells: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", cells.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_row_matches_expected_shape() {
        assert_eq!(format_row(&[0, 2, -3]), "[0, 2, -3]");
        assert_eq!(format_row(&[]), "[]");
    }
}
