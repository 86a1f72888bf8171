#![forbid(unsafe_code)]

//! Scenario arguments shared by every subcommand: array size, baseline
//! values, and the update sequence, parsed into an engine.

use std::str::FromStr;

use clap::Args;
use deltaviz_core::DiffEngine;

use crate::error::{CliError, Result};

/// One `L:R:VAL` update spec from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSpec {
    pub l: usize,
    pub r: usize,
    pub val: i64,
}

impl FromStr for UpdateSpec {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CliError::InvalidUpdateSpec { spec: s.to_string() };
        let mut parts = s.split(':');
        let (l, r, val) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(l), Some(r), Some(val), None) => (l, r, val),
            _ => return Err(invalid()),
        };
        Ok(Self {
            l: l.trim().parse().map_err(|_| invalid())?,
            r: r.trim().parse().map_err(|_| invalid())?,
            val: val.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// Scenario shared by the `compute`, `animate`, and `replay` subcommands.
#[derive(Debug, Clone, Args)]
pub struct ScenarioArgs {
    /// Array size (number of cells).
    #[arg(long, default_value_t = deltaviz_core::DEFAULT_SIZE)]
    pub size: usize,

    /// Baseline values, comma-separated; truncated or zero-padded to SIZE.
    #[arg(long, value_name = "V,V,..")]
    pub initial: Option<String>,

    /// Range update as L:R:VAL; repeatable, applied in order.
    #[arg(long = "update", value_name = "L:R:VAL")]
    pub updates: Vec<UpdateSpec>,
}

impl ScenarioArgs {
    /// Build an engine loaded with this scenario.
    pub fn build_engine(&self) -> Result<DiffEngine> {
        let mut engine = DiffEngine::new(self.size)?;
        if let Some(initial) = &self.initial {
            let values = parse_int_list(initial)?;
            engine.set_initial_array(&values);
        }
        for spec in &self.updates {
            engine.add_update(spec.l, spec.r, spec.val)?;
        }
        Ok(engine)
    }
}

/// Parse a comma-separated integer list; the empty string is empty.
pub fn parse_int_list(s: &str) -> Result<Vec<i64>> {
    s.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse().map_err(|_| CliError::InvalidInteger {
                token: token.to_string(),
                context: "baseline values",
            })
        })
        .collect()
}
