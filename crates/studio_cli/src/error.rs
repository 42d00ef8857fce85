//! CLI error types.

use thiserror::Error;

/// Errors raised by the CLI itself rather than by the template library.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
