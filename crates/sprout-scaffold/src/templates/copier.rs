//! Template tree copying

use crate::error::{Result, ScaffoldError};
use rust_embed::RustEmbed;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Template file name that is written under a different name
///
/// Packaging tools drop `.gitignore` files, so templates ship it without the
/// leading dot.
const GITIGNORE_SOURCE: &str = "gitignore";
const GITIGNORE_DEST: &str = ".gitignore";

/// Map a template file name to the name it is written as
pub fn destination_name(file_name: &OsStr) -> &OsStr {
    if file_name == GITIGNORE_SOURCE {
        OsStr::new(GITIGNORE_DEST)
    } else {
        file_name
    }
}

/// Rewrite the last segment of a template-relative path with [`destination_name`]
fn destination_path(relative: &Path) -> PathBuf {
    match (relative.parent(), relative.file_name()) {
        (Some(parent), Some(name)) => parent.join(destination_name(name)),
        _ => relative.to_path_buf(),
    }
}

/// Recursively copy a template tree into `target_dir`
///
/// Directories are created (with intermediate segments) before their
/// contents, files are copied verbatim. Returns the written files relative
/// to `target_dir`. Nothing is rolled back if a copy fails partway.
pub async fn copy_template(template_dir: &Path, target_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut copied_files = Vec::new();

    for entry in WalkDir::new(template_dir)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| template_dir.to_path_buf());
            ScaffoldError::io("read", path, e.into())
        })?;

        let relative = entry
            .path()
            .strip_prefix(template_dir)
            .unwrap_or(entry.path());

        if entry.file_type().is_dir() {
            let dest = target_dir.join(relative);
            fs::create_dir_all(&dest)
                .await
                .map_err(|e| ScaffoldError::io("create directory", &dest, e))?;
            continue;
        }

        let relative_dest = destination_path(relative);
        let dest = target_dir.join(&relative_dest);

        fs::copy(entry.path(), &dest)
            .await
            .map_err(|e| ScaffoldError::io("copy template file to", &dest, e))?;
        tracing::debug!(file = %relative_dest.display(), "copied template file");

        copied_files.push(relative_dest);
    }

    Ok(copied_files)
}

/// Write the embedded template `name` into `target_dir`
///
/// Same contract as [`copy_template`]. Embedded trees only carry files, so
/// empty directories in the source tree are not reproduced.
pub async fn copy_bundled_template<E: RustEmbed>(
    name: &str,
    target_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let prefix = format!("{}/", name);
    let mut files: Vec<_> = E::iter().filter(|f| f.starts_with(&prefix)).collect();
    files.sort();

    let mut copied_files = Vec::new();
    for file in files {
        let contents = E::get(&file).ok_or_else(|| ScaffoldError::BundledFileMissing {
            path: file.to_string(),
        })?;

        let relative_dest = destination_path(Path::new(&file[prefix.len()..]));
        let dest = target_dir.join(&relative_dest);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::io("create directory", parent, e))?;
        }
        fs::write(&dest, contents.data)
            .await
            .map_err(|e| ScaffoldError::io("copy template file to", &dest, e))?;
        tracing::debug!(file = %relative_dest.display(), "wrote bundled template file");

        copied_files.push(relative_dest);
    }

    Ok(copied_files)
}
