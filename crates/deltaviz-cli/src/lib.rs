#![forbid(unsafe_code)]

//! Headless driver for the deltaviz engine.
//!
//! The engine owns no timers and renders nothing; this binary is the
//! "external collaborator" that builds a scenario from command-line
//! arguments, drives the engine through its public API, and prints the
//! arrays it observes. Three modes:
//!
//! - `compute` — instant derivation: difference array and final array.
//! - `animate` — stepped reconstruction, one `tick()` per sleep interval,
//!   printing each committed cell.
//! - `replay` — scrub the update history forward one prefix at a time.

pub mod cli;
pub mod error;
pub mod run;
pub mod scenario;

pub use error::{CliError, Result};

/// Parse arguments from the environment and run the selected command.
pub fn run_from_env() -> Result<()> {
    init_tracing();
    let cli = <cli::Cli as clap::Parser>::parse();
    cli::run(cli)
}

/// Route tracing to stderr, filtered by `RUST_LOG`; stdout is reserved for
/// the array output.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
