//! CLI configuration.
//!
//! Precedence: command-line flag or environment variable, then `studio.toml`,
//! then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use studio_templates::{Schema, TemplateLoader, TemplateRegistry};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "studio.toml";

/// Default template source.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Contents of `studio.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudioConfig {
    /// Template file or directory
    #[serde(default)]
    pub templates: Option<PathBuf>,
    /// Schema file used for default templates
    #[serde(default)]
    pub schema: Option<PathBuf>,
}

impl StudioConfig {
    /// Read a config file. Relative paths in it are taken relative to the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: StudioConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.templates = config.templates.map(|p| base.join(p));
        config.schema = config.schema.map(|p| base.join(p));
        Ok(config)
    }
}

/// Effective settings after applying precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub templates: PathBuf,
    pub schema: Option<PathBuf>,
}

impl Settings {
    /// Merge explicit values over the config file.
    ///
    /// An explicitly named config file must exist; the default one is optional.
    pub fn resolve(
        templates: Option<PathBuf>,
        schema: Option<PathBuf>,
        config_path: Option<&Path>,
    ) -> Result<Self> {
        let file_config = match config_path {
            Some(path) => StudioConfig::load(path)?,
            None if Path::new(CONFIG_FILE).exists() => StudioConfig::load(Path::new(CONFIG_FILE))?,
            None => StudioConfig::default(),
        };

        let settings = Self {
            templates: templates
                .or(file_config.templates)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR)),
            schema: schema.or(file_config.schema),
        };
        debug!("Effective settings: {:?}", settings);
        Ok(settings)
    }

    /// Load the schema, if one is configured.
    pub fn load_schema(&self) -> Result<Schema> {
        match &self.schema {
            Some(path) => TemplateLoader::load_schema(path)
                .with_context(|| format!("Failed to load schema from {}", path.display())),
            None => Ok(Schema::default()),
        }
    }

    /// Load and validate the template registry.
    pub fn load_registry(&self) -> Result<TemplateRegistry> {
        let schema = self.load_schema()?;
        let loader = TemplateLoader::new(&self.templates);
        debug!("Loading templates from {:?}", loader.templates_path());
        let registry = loader.load_registry(&schema)?;
        Ok(registry)
    }
}
