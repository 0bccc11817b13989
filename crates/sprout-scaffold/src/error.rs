//! Error types for scaffolding workflows

use crate::runtime::PackageManager;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the scaffolder's error type
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Everything that can stop a create or augment run
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// Conflicting or malformed command-line input
    #[error("{0}")]
    InvalidArguments(String),

    /// Create mode target already has content
    #[error("Directory {} already exists or is not empty", .path.display())]
    DirectoryNotEmpty { path: PathBuf },

    /// Augment mode run outside an initialized project
    #[error("No package.json found in {}. Run this command from the root of an existing project", .path.display())]
    ManifestMissing { path: PathBuf },

    #[error("A routes directory already exists in this project ({})", .path.display())]
    RoutesDirectoryExists { path: PathBuf },

    #[error("Template '{name}' not found. Available templates: {available}")]
    TemplateNotFound { name: String, available: String },

    /// The template tree compiled into the binary lacks a required file
    #[error("Bundled templates are missing {path}")]
    BundledFileMissing { path: String },

    /// Filesystem failure, tagged with what we were doing at the time
    #[error("Failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", .path.display())]
    ManifestParse { path: PathBuf, message: String },

    #[error("Failed to serialize {}", .path.display())]
    ManifestSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse template catalogue {}", .path.display())]
    CatalogueParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Package manager ran but exited unsuccessfully
    #[error("{manager} exited with {}:\n{stderr}", describe_exit(.code))]
    InstallFailed {
        manager: PackageManager,
        code: Option<i32>,
        stderr: String,
    },

    /// Package manager binary could not be started
    #[error("Failed to run {manager}")]
    InstallSpawn {
        manager: PackageManager,
        #[source]
        source: std::io::Error,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "a signal".to_string(),
    }
}

impl ScaffoldError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
