#![forbid(unsafe_code)]

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::run::{run_animate, run_compute, run_replay};
use crate::scenario::ScenarioArgs;

#[derive(Debug, Parser)]
#[command(
    name = "deltaviz",
    about = "Headless driver for the difference-array range-update engine",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply the updates and print the difference and final arrays.
    Compute(ScenarioArgs),

    /// Reconstruct the final array one cell per tick, at a fixed cadence.
    Animate(AnimateArgs),

    /// Scrub the replay cursor forward through every update prefix.
    Replay(ScenarioArgs),
}

#[derive(Debug, Args)]
pub struct AnimateArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Milliseconds to sleep between ticks (0 = no sleep).
    #[arg(long, default_value_t = 600)]
    pub delay_ms: u64,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Compute(args) => run_compute(&args),
        Commands::Animate(args) => run_animate(&args),
        Commands::Replay(args) => run_replay(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compute_with_updates() {
        let cli = Cli::try_parse_from([
            "deltaviz", "compute", "--size", "6", "--update", "1:3:2", "--update", "2:5:3",
        ])
        .unwrap();
        match cli.command {
            Commands::Compute(args) => {
                assert_eq!(args.size, 6);
                assert_eq!(args.updates.len(), 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_animate_delay() {
        let cli =
            Cli::try_parse_from(["deltaviz", "animate", "--delay-ms", "0", "--update", "0:3:5", "--size", "4"])
                .unwrap();
        match cli.command {
            Commands::Animate(args) => {
                assert_eq!(args.delay_ms, 0);
                assert_eq!(args.scenario.size, 4);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_update_spec() {
        assert!(Cli::try_parse_from(["deltaviz", "compute", "--update", "1-3-2"]).is_err());
    }
}
