//! Link command - Print the create-document intent link of a template.

use anyhow::Result;
use clap::Args;

use studio_templates::create_document_link;

use crate::config::Settings;

#[derive(Args)]
pub struct LinkArgs {
    /// Template ID
    pub template: String,
}

pub async fn execute(args: LinkArgs, settings: &Settings) -> Result<()> {
    let registry = settings.load_registry()?;
    let template = registry.get_required(&args.template)?;

    // No router outside the studio, so this is always the fallback form.
    println!("{}", create_document_link(None, template));
    Ok(())
}
