//! Template loading from the filesystem.
//!
//! A template source is either a single `.yaml`/`.yml`/`.json` file or a
//! directory of such files (not recursive, read in file name order). Each file
//! holds a list of templates or a single template.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{TemplateError, TemplateResult};
use crate::registry::TemplateRegistry;
use crate::schema::Schema;
use crate::template::{Template, TemplateEntry};

#[derive(Deserialize)]
#[serde(untagged)]
enum TemplateFile {
    Many(Vec<Template>),
    One(Template),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Some(FileFormat::Yaml),
            Some("json") => Some(FileFormat::Json),
            _ => None,
        }
    }
}

/// Template loader.
pub struct TemplateLoader {
    templates_path: PathBuf,
}

impl TemplateLoader {
    /// Create a new template loader.
    pub fn new(templates_path: impl Into<PathBuf>) -> Self {
        Self {
            templates_path: templates_path.into(),
        }
    }

    pub fn templates_path(&self) -> &Path {
        &self.templates_path
    }

    /// Read the configured source.
    ///
    /// Returns `None` when the path does not exist, so that defaults apply.
    pub fn load_source(&self) -> TemplateResult<Option<Vec<TemplateEntry>>> {
        let path = &self.templates_path;

        if !path.exists() {
            warn!("Template source does not exist: {:?}", path);
            return Ok(None);
        }

        let templates = if path.is_dir() {
            self.load_dir(path)?
        } else {
            Self::load_file(path)?
        };

        info!("Loaded {} template definition(s) from {:?}", templates.len(), path);
        Ok(Some(templates.into_iter().map(TemplateEntry::from).collect()))
    }

    /// Read and validate the configured source into a registry.
    pub fn load_registry(&self, schema: &Schema) -> TemplateResult<TemplateRegistry> {
        let source = self.load_source()?;
        Ok(TemplateRegistry::from_source(schema, source)?)
    }

    fn load_dir(&self, dir: &Path) -> TemplateResult<Vec<Template>> {
        let mut templates = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if FileFormat::of(path).is_none() {
                debug!("Skipping non-template file {:?}", path);
                continue;
            }
            templates.extend(Self::load_file(path)?);
        }

        Ok(templates)
    }

    /// Load the templates defined in one file.
    pub fn load_file(path: &Path) -> TemplateResult<Vec<Template>> {
        debug!("Loading templates from {:?}", path);
        let format = FileFormat::of(path).ok_or_else(|| TemplateError::InvalidFile {
            path: path.to_path_buf(),
            message: "expected a .yaml, .yml or .json file".to_string(),
        })?;

        let content = fs::read_to_string(path)?;
        let file: TemplateFile = match format {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };

        Ok(match file {
            TemplateFile::Many(templates) => templates,
            TemplateFile::One(template) => vec![template],
        })
    }

    /// Load a schema description from a YAML or JSON file.
    pub fn load_schema(path: &Path) -> TemplateResult<Schema> {
        debug!("Loading schema from {:?}", path);
        let content = fs::read_to_string(path)?;
        match FileFormat::of(path) {
            Some(FileFormat::Json) => Ok(serde_json::from_str(&content)?),
            Some(FileFormat::Yaml) => Ok(serde_yaml::from_str(&content)?),
            None => Err(TemplateError::InvalidFile {
                path: path.to_path_buf(),
                message: "expected a .yaml, .yml or .json file".to_string(),
            }),
        }
    }
}
