//! package.json creation and script merging

use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const MANIFEST_FILE: &str = "package.json";

/// Manifest written for a brand-new project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    #[serde(rename = "type")]
    pub module_type: String,
    pub version: String,
    pub private: bool,
    pub scripts: BTreeMap<String, String>,
}

impl PackageManifest {
    /// ES-module, private manifest with a single `dev` script
    pub fn new(name: impl Into<String>, dev_command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module_type: "module".to_string(),
            version: "0.0.0".to_string(),
            private: true,
            scripts: BTreeMap::from([("dev".to_string(), dev_command.into())]),
        }
    }
}

/// Pretty-print with 2-space indentation and a trailing newline
pub fn render<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

/// Write a fresh manifest into `root_dir`, returning its path
pub async fn write_manifest(root_dir: &Path, manifest: &PackageManifest) -> Result<PathBuf> {
    let path = root_dir.join(MANIFEST_FILE);
    let content = render(manifest).map_err(|source| ScaffoldError::ManifestSerialize {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, content)
        .await
        .map_err(|e| ScaffoldError::io("write", &path, e))?;
    Ok(path)
}

/// Insert `scripts` into a parsed manifest, keeping every other key
///
/// A missing or non-object `scripts` field is replaced by an object. The
/// manifest root itself must be an object.
pub fn merge_scripts(
    manifest: &mut Value,
    scripts: &[(&str, String)],
) -> std::result::Result<(), String> {
    let root = manifest
        .as_object_mut()
        .ok_or_else(|| "expected a JSON object at the top level".to_string())?;

    let entry = root
        .entry("scripts")
        .or_insert_with(|| Value::Object(Default::default()));
    if !entry.is_object() {
        *entry = Value::Object(Default::default());
    }

    if let Some(existing) = entry.as_object_mut() {
        for (key, command) in scripts {
            existing.insert(key.to_string(), Value::String(command.clone()));
        }
    }

    Ok(())
}

/// Read `package.json`, merge `scripts` into it and write it back
pub async fn merge_manifest_scripts(root_dir: &Path, scripts: &[(&str, String)]) -> Result<PathBuf> {
    let path = root_dir.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path)
        .await
        .map_err(|e| ScaffoldError::io("read", &path, e))?;

    let parse_error = |message: String| ScaffoldError::ManifestParse {
        path: path.clone(),
        message,
    };

    let mut manifest: Value =
        serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
    merge_scripts(&mut manifest, scripts).map_err(parse_error)?;

    let rendered = render(&manifest).map_err(|e| parse_error(e.to_string()))?;
    fs::write(&path, rendered)
        .await
        .map_err(|e| ScaffoldError::io("write", &path, e))?;

    Ok(path)
}
