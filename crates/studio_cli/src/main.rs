//! studio CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: Template error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use studio_templates::TemplateError;

mod commands;
mod config;
mod error;

use commands::{Cli, Commands};
use error::CliError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,studio_cli={},studio_templates={}",
            level, level
        ))
    });
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match cli.settings() {
        Ok(settings) => match cli.command {
            Commands::List(args) => commands::list::execute(args, &settings).await,
            Commands::Validate(args) => commands::validate::execute(args, &settings).await,
            Commands::Resolve(args) => commands::resolve::execute(args, &settings).await,
            Commands::Link(args) => commands::link::execute(args, &settings).await,
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(CliError::InvalidArgument(_)) = e.downcast_ref::<CliError>() {
        return ExitCodes::INVALID_ARGS;
    }

    match e.downcast_ref::<TemplateError>() {
        Some(TemplateError::Validation(_)) => ExitCodes::VALIDATION_FAILURE,
        Some(TemplateError::NotFound(_)) => ExitCodes::INVALID_ARGS,
        Some(_) => ExitCodes::TEMPLATE_ERROR,
        None => ExitCodes::GENERAL_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use studio_templates::{InvalidTemplateError, ValidationError};

    #[test]
    fn test_invalid_argument_exit_code() {
        let err = anyhow::Error::from(CliError::InvalidArgument("--params".into()));
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);

        let err = anyhow::anyhow!("Invalid argument lookalike");
        assert_eq!(categorize_error(&err), ExitCodes::GENERAL_ERROR);
    }

    #[test]
    fn test_template_error_exit_codes() {
        let err = anyhow::Error::from(TemplateError::NotFound("author".into()));
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);

        let err = anyhow::Error::from(TemplateError::Validation(ValidationError::MissingId {
            index: 0,
        }));
        assert_eq!(categorize_error(&err), ExitCodes::VALIDATION_FAILURE);

        let err = anyhow::Error::from(TemplateError::InvalidTemplate(
            InvalidTemplateError::NonObject { id: "author".into() },
        ));
        assert_eq!(categorize_error(&err), ExitCodes::TEMPLATE_ERROR);
    }

    #[test]
    fn test_context_keeps_exit_code() {
        let result: Result<(), TemplateError> = Err(TemplateError::NotFound("author".into()));
        let err = result.context("Failed to load templates").unwrap_err();
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);
    }
}
