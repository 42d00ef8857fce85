//! Resolve command - Print a template's initial value.

use anyhow::Result;
use clap::Args;
use serde_json::Value;
use tracing::info;

use crate::config::Settings;
use crate::error::CliError;

#[derive(Args)]
pub struct ResolveArgs {
    /// Template ID
    pub template: String,

    /// Resolver parameters as a JSON object, replacing the template's own
    #[arg(long)]
    pub params: Option<String>,

    /// Print on a single line
    #[arg(long)]
    pub compact: bool,
}

pub async fn execute(args: ResolveArgs, settings: &Settings) -> Result<()> {
    info!("Resolving template: {}", args.template);

    let params: Option<Value> = args
        .params
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .map_err(|e| CliError::InvalidArgument(format!("--params must be valid JSON: {}", e)))?;

    let registry = settings.load_registry()?;
    let value = registry.resolve(&args.template, params.as_ref()).await?;

    if args.compact {
        println!("{}", value);
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
