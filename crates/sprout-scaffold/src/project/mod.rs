//! Project description and the create / augment workflows

pub mod augment;
pub mod create;
pub mod files;
pub mod manifest;
pub mod routes;

use crate::error::{Result, ScaffoldError};
use crate::runtime::PackageManager;
use std::fmt;
use std::path::{Path, PathBuf};

pub use augment::augment_project;
pub use create::create_project;

/// Whether we start a new project or retrofit an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Create,
    Augment,
}

/// Front-end build integration applied while augmenting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Integration {
    #[default]
    None,
    Vite,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Create => write!(f, "create"),
            Mode::Augment => write!(f, "augment"),
        }
    }
}

/// The knobs a single run is configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScaffoldOptions {
    pub mode: Mode,
    pub integration: Integration,
    pub package_manager: PackageManager,
}

impl ScaffoldOptions {
    /// Build options from the raw command-line modifiers
    ///
    /// `--existing` and `--vite` are mutually exclusive, and neither may be
    /// combined with a project name (both operate on the current directory).
    /// Template flags only apply to create mode.
    pub fn from_flags(
        name_given: bool,
        existing: bool,
        vite: bool,
        template_given: bool,
        package_manager: PackageManager,
    ) -> Result<Self> {
        if existing && vite {
            return Err(ScaffoldError::InvalidArguments(
                "--existing and --vite cannot be used together".to_string(),
            ));
        }
        if name_given && (existing || vite) {
            let flag = if existing { "--existing" } else { "--vite" };
            return Err(ScaffoldError::InvalidArguments(format!(
                "A project name cannot be combined with {}; it works on the current directory",
                flag
            )));
        }
        if template_given && (existing || vite) {
            return Err(ScaffoldError::InvalidArguments(
                "--template and --template-dir only apply when creating a new project".to_string(),
            ));
        }

        let (mode, integration) = match (existing, vite) {
            (true, _) => (Mode::Augment, Integration::None),
            (_, true) => (Mode::Augment, Integration::Vite),
            _ => (Mode::Create, Integration::None),
        };

        Ok(Self {
            mode,
            integration,
            package_manager,
        })
    }
}

/// Everything a workflow needs to know about the target project
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    name: String,
    options: ScaffoldOptions,
    root_dir: PathBuf,
}

impl ProjectDescriptor {
    /// Fix the project root once: `cwd` when augmenting, `cwd/name` when creating
    pub fn new(
        name: Option<&str>,
        default_name: &str,
        options: ScaffoldOptions,
        cwd: &Path,
    ) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(default_name)
            .to_string();

        let root_dir = match options.mode {
            Mode::Augment => cwd.to_path_buf(),
            Mode::Create => cwd.join(&name),
        };

        Self {
            name,
            options,
            root_dir,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name written to package.json: the last path segment of the root
    pub fn package_name(&self) -> String {
        self.root_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn options(&self) -> ScaffoldOptions {
        self.options
    }

    pub fn mode(&self) -> Mode {
        self.options.mode
    }

    pub fn integration(&self) -> Integration {
        self.options.integration
    }

    pub fn package_manager(&self) -> PackageManager {
        self.options.package_manager
    }
}
