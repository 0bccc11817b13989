//! Template lookup and copying
//!
//! This module provides:
//! - Template catalogue types (RootManifest, TemplateEntry)
//! - Choosing between the bundled templates and an on-disk override
//! - Template tree copying with the `gitignore` rename
//! - Version compatibility checking

pub mod copier;
pub mod manifest;
pub mod version;

use crate::error::{Result, ScaffoldError};
use crate::product::ProductConfig;
use crate::runtime::EnvProvider;
use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};

pub use copier::{copy_bundled_template, copy_template, destination_name};
pub use manifest::{RootManifest, TemplateEntry};
pub use version::check_compatibility;

/// Where the template catalogue and trees are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Compiled into the binary
    Bundled,
    /// A directory on disk (for template development)
    Directory(PathBuf),
}

/// A template picked from the catalogue, ready to copy
#[derive(Debug, Clone)]
pub struct SelectedTemplate {
    pub entry: TemplateEntry,
    pub source: TemplateSource,
}

impl SelectedTemplate {
    /// Copy this template's tree into `target_dir`
    pub async fn copy_into<E: RustEmbed>(&self, target_dir: &Path) -> Result<Vec<PathBuf>> {
        match &self.source {
            TemplateSource::Bundled => copy_bundled_template::<E>(&self.entry.name, target_dir).await,
            TemplateSource::Directory(root) => {
                copy_template(&root.join(&self.entry.name), target_dir).await
            }
        }
    }
}

/// Work out where templates come from
///
/// Order: explicit flag, the product's env override, then the bundled tree.
pub fn resolve_template_source<C: ProductConfig>(
    config: &C,
    explicit: Option<&Path>,
    env: &impl EnvProvider,
) -> TemplateSource {
    if let Some(path) = explicit {
        return TemplateSource::Directory(path.to_path_buf());
    }

    match env.var(config.template_dir_env()).filter(|v| !v.is_empty()) {
        Some(path) => TemplateSource::Directory(PathBuf::from(path)),
        None => TemplateSource::Bundled,
    }
}

/// Look up `name` in the catalogue and make sure its tree exists
pub fn select_template<E: RustEmbed>(source: &TemplateSource, name: &str) -> Result<SelectedTemplate> {
    let catalogue = match source {
        TemplateSource::Bundled => RootManifest::bundled::<E>()?,
        TemplateSource::Directory(dir) => RootManifest::load(dir)?,
    };

    let not_found = || ScaffoldError::TemplateNotFound {
        name: name.to_string(),
        available: catalogue.available(),
    };

    let entry = catalogue.find(name).cloned().ok_or_else(not_found)?;

    let has_tree = match source {
        TemplateSource::Bundled => {
            let prefix = format!("{}/", entry.name);
            E::iter().any(|f| f.starts_with(&prefix))
        }
        TemplateSource::Directory(dir) => dir.join(&entry.name).is_dir(),
    };
    if !has_tree {
        return Err(not_found());
    }

    Ok(SelectedTemplate {
        entry,
        source: source.clone(),
    })
}
