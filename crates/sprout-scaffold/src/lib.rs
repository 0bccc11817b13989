//! Sprout Scaffold - project scaffolding for Sprout API servers
//!
//! This library creates a new API-server project from a bundled template,
//! or retrofits an existing JavaScript project with the server's scripts,
//! dependencies and a starter `routes/` directory.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - package manager detection, template copying,
//!   manifest editing, file appends
//! - **Layer 2: Workflows** - `create_project` / `augment_project`, driven step by
//!   step through the `Reporter` and `Installer` seams
//! - **Layer 3: CLI Interface** - Optional cliclack-based front-end (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based front-end
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use sprout_scaffold::{project, runtime, workflow::PlainReporter};
//!
//! let options = project::ScaffoldOptions::from_flags(false, true, false, false, runtime::PackageManager::Npm)?;
//! let descriptor = project::ProjectDescriptor::new(None, "my-app", options, &cwd);
//! project::augment_project(&MyConfig, &runtime::CommandInstaller, &mut PlainReporter, &descriptor).await?;
//! ```

pub mod error;
pub mod product;
pub mod project;
pub mod runtime;
pub mod templates;
pub mod workflow;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenience
pub use error::{Result, ScaffoldError};
pub use product::ProductConfig;
pub use project::{
    augment_project, create_project, Integration, Mode, ProjectDescriptor, ScaffoldOptions,
};
pub use runtime::{CommandInstaller, EnvProvider, Installer, PackageManager, ProcessEnv};
pub use templates::{RootManifest, SelectedTemplate, TemplateEntry, TemplateSource};
pub use workflow::{PlainReporter, Reporter, StepOutcome};

#[cfg(feature = "tui")]
pub use tui::{run, RunArgs};
