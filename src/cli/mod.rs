pub mod output;
mod shell;

use thiserror::Error;

use crate::{config::ConfigError, errors::LedgerError};

pub use shell::{run_cli, LoopControl, Shell};

/// User-facing CLI error wrapper. Every variant ends the current run.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid amount: `{0}` is not a number")]
    InvalidAmount(String),
}
