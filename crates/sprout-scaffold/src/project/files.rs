//! Appending to .gitignore and environment files

use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub const IGNORE_FILE: &str = ".gitignore";

/// Environment files checked in order; the first is created when none exist
pub const ENV_CANDIDATES: &[&str] = &[
    ".env.local",
    ".env.development.local",
    ".env.development",
    ".env",
];

/// What happened to the environment file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvUpdate {
    Appended(PathBuf),
    Created(PathBuf),
}

async fn append(path: &Path, content: &str) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(path)
        .await
        .map_err(|e| ScaffoldError::io("open", path, e))?;
    file.write_all(content.as_bytes())
        .await
        .map_err(|e| ScaffoldError::io("append to", path, e))?;
    file.flush()
        .await
        .map_err(|e| ScaffoldError::io("append to", path, e))
}

/// Append `block` to the project's .gitignore if there is one
///
/// Returns `None` when the project has no ignore file; that is not an error.
pub async fn append_ignore_block(root_dir: &Path, block: &str) -> Result<Option<PathBuf>> {
    let path = root_dir.join(IGNORE_FILE);
    if !path.is_file() {
        return Ok(None);
    }

    append(&path, block).await?;
    Ok(Some(path))
}

/// Add `entry` to the first existing env file, or create one
pub async fn update_env_file(root_dir: &Path, entry: &str) -> Result<EnvUpdate> {
    for candidate in ENV_CANDIDATES {
        let path = root_dir.join(candidate);
        if !path.is_file() {
            continue;
        }

        let existing = fs::read_to_string(&path)
            .await
            .map_err(|e| ScaffoldError::io("read", &path, e))?;
        let mut content = String::new();
        if !existing.is_empty() && !existing.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(entry);
        content.push('\n');

        append(&path, &content).await?;
        return Ok(EnvUpdate::Appended(path));
    }

    let path = root_dir.join(ENV_CANDIDATES[0]);
    fs::write(&path, format!("{}\n", entry))
        .await
        .map_err(|e| ScaffoldError::io("write", &path, e))?;
    Ok(EnvUpdate::Created(path))
}
