//! Package manager detection and dependency installation
//!
//! This module provides:
//! - Detection of the invoking package manager (npm, pnpm, bun)
//! - Manager-specific command syntax
//! - The `Installer` seam used by the workflows

pub mod install;
pub mod package_manager;

pub use install::{CommandInstaller, Installer};
pub use package_manager::{EnvProvider, PackageManager, ProcessEnv, USER_AGENT_ENV};
