//! Template catalogue types and parsing

use crate::error::{Result, ScaffoldError};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the catalogue at the root of the templates directory
pub const CATALOGUE_FILE: &str = "template.yaml";

/// One selectable template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Directory name under the templates root
    pub name: String,

    /// Description of what the template provides
    #[serde(default)]
    pub description: String,

    /// Minimum CLI version the template was written for
    #[serde(default)]
    pub version: Option<String>,
}

/// Root template catalogue (templates/template.yaml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootManifest {
    pub templates: Vec<TemplateEntry>,
}

impl RootManifest {
    /// Read the catalogue from a templates directory
    pub fn load(template_dir: &Path) -> Result<Self> {
        let path = template_dir.join(CATALOGUE_FILE);
        let content = std::fs::read(&path).map_err(|e| ScaffoldError::io("read", &path, e))?;
        Self::parse(&content, path)
    }

    /// Read the catalogue compiled into the binary
    pub fn bundled<E: RustEmbed>() -> Result<Self> {
        let file = E::get(CATALOGUE_FILE).ok_or_else(|| ScaffoldError::BundledFileMissing {
            path: CATALOGUE_FILE.to_string(),
        })?;
        Self::parse(&file.data, PathBuf::from(CATALOGUE_FILE))
    }

    fn parse(content: &[u8], path: PathBuf) -> Result<Self> {
        serde_yaml::from_slice(content).map_err(|source| ScaffoldError::CatalogueParse { path, source })
    }

    pub fn find(&self, name: &str) -> Option<&TemplateEntry> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Comma-separated template names, for error messages
    pub fn available(&self) -> String {
        self.templates
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
