//! Validate command - Check template definitions.

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::config::Settings;

#[derive(Args)]
pub struct ValidateArgs {
    /// Also resolve every template's initial value
    #[arg(long)]
    pub resolve: bool,
}

pub async fn execute(args: ValidateArgs, settings: &Settings) -> Result<()> {
    info!("Validating templates in {:?}", settings.templates);

    println!("📋 Validating template definitions...");
    let registry = settings.load_registry()?;
    println!("   ✅ {} template(s) valid", registry.len());

    if args.resolve {
        println!("🧪 Resolving initial values...");
        for template in registry.list() {
            registry.resolve(&template.id, None).await?;
            println!("   ✅ {}", template.id);
        }
    }

    println!();
    println!("✅ All validations passed!");
    Ok(())
}
