use rustyline::error::ReadlineError;
use saver_config::ConfigError;
use saver_http::HttpLedgerError;
use thiserror::Error;

/// Failures that stop the shell itself. Command-level failures are reported
/// inline and never end the session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ledger(#[from] HttpLedgerError),
    #[error("Failed to start async runtime: {0}")]
    Runtime(std::io::Error),
    #[error("Terminal error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    Input(String),
}
