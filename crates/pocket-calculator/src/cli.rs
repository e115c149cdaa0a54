//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{CalculatorConfig, ChainPolicy};
use crate::error::AppResult;

/// Terminal pocket calculator
#[derive(Parser, Debug)]
#[command(name = "pocket-calc", version, about)]
pub struct Cli {
    /// Verbosity level for the log file (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// JSON config file; command-line options override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// What an operator key does after it completes a pending calculation
    #[arg(long)]
    pub chain: Option<ChainArg>,

    /// Maximum fraction digits on the display
    #[arg(long)]
    pub precision: Option<usize>,

    /// Number of calculations kept on the tape
    #[arg(long)]
    pub tape_capacity: Option<usize>,

    /// Write logs to this file (logs are discarded otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write the tape to this file as JSON on exit
    #[arg(long)]
    pub export_tape: Option<PathBuf>,
}

/// Chain policy argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainArg {
    /// Drop the operator that triggered the evaluation
    Discard,
    /// Keep it pending with the result as first operand
    Carry,
}

impl From<ChainArg> for ChainPolicy {
    fn from(arg: ChainArg) -> Self {
        match arg {
            ChainArg::Discard => Self::Discard,
            ChainArg::Carry => Self::Carry,
        }
    }
}

impl Cli {
    /// Builds the calculator configuration: config file first, then flags
    pub fn calculator_config(&self) -> AppResult<CalculatorConfig> {
        let mut config = match &self.config {
            Some(path) => CalculatorConfig::load(path)?,
            None => CalculatorConfig::default(),
        };
        if let Some(chain) = self.chain {
            config = config.with_chain_policy(chain.into());
        }
        if let Some(precision) = self.precision {
            config = config.with_max_fraction_digits(precision);
        }
        if let Some(capacity) = self.tape_capacity {
            config = config.with_tape_capacity(capacity);
        }
        Ok(config)
    }

    /// Default log filter for the verbosity level
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
