//! List command - Show available templates.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use studio_templates::Template;

use crate::config::Settings;

#[derive(Args)]
pub struct ListArgs {
    /// Only templates for this schema type
    #[arg(long)]
    pub schema_type: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TemplateSummary<'a> {
    id: &'a str,
    title: &'a str,
    schema_type: &'a str,
    value: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
}

impl<'a> From<&'a Template> for TemplateSummary<'a> {
    fn from(template: &'a Template) -> Self {
        Self {
            id: &template.id,
            title: &template.title,
            schema_type: &template.schema_type,
            value: template.value_shape().map_or("none", |s| s.as_str()),
            icon: template.icon.as_deref(),
        }
    }
}

pub async fn execute(args: ListArgs, settings: &Settings) -> Result<()> {
    info!("Listing templates from {:?}", settings.templates);

    let registry = settings.load_registry()?;
    let templates: Vec<&Template> = match &args.schema_type {
        Some(schema_type) => registry.for_schema_type(schema_type),
        None => registry.list().iter().collect(),
    };
    let summaries: Vec<TemplateSummary> = templates.into_iter().map(Into::into).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("⚠️  No templates found");
        return Ok(());
    }

    println!("{:<24} {:<24} {:<20} VALUE", "ID", "TITLE", "SCHEMA TYPE");
    for s in &summaries {
        println!(
            "{:<24} {:<24} {:<20} {}",
            s.id, s.title, s.schema_type, s.value
        );
    }

    Ok(())
}
