//! CLI command definitions.
//!
//! Each subcommand loads the template registry according to the global
//! source options and works on it.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod link;
pub mod list;
pub mod resolve;
pub mod validate;

/// studio - initial value templates
#[derive(Parser)]
#[command(name = "studio")]
#[command(version, about = "Inspect, validate and resolve initial value templates")]
#[command(long_about = r#"
Work with the initial value templates of a studio: named recipes that produce
the starting value of a new document.

COMMANDS:
  list      → List templates (schema defaults when no source exists)
  validate  → Validate template definitions
  resolve   → Print the normalized initial value of a template
  link      → Print the intent link that creates a document from a template

CONFIGURATION:
  --templates / STUDIO_TEMPLATES / studio.toml `templates` (default: templates/)
  --schema    / STUDIO_SCHEMA    / studio.toml `schema`

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Template error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Template file or directory
    #[arg(long, global = true, env = "STUDIO_TEMPLATES")]
    pub templates: Option<PathBuf>,

    /// Schema file used to derive default templates
    #[arg(long, global = true, env = "STUDIO_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Config file (default: ./studio.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn settings(&self) -> Result<Settings> {
        Settings::resolve(
            self.templates.clone(),
            self.schema.clone(),
            self.config.as_deref(),
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available templates
    List(list::ListArgs),

    /// Validate template definitions
    Validate(validate::ValidateArgs),

    /// Resolve the initial value of a template
    Resolve(resolve::ResolveArgs),

    /// Print the create-document intent link for a template
    Link(link::LinkArgs),
}
