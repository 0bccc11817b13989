//! Test doubles shared by the library's unit tests

use crate::error::{Result, ScaffoldError};
use crate::product::ProductConfig;
use crate::project::{Integration, Mode};
use crate::runtime::{Installer, PackageManager};
use crate::workflow::{Reporter, StepOutcome};
use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Small template catalogue: `basic`, `future` (needs CLI 99.0.0) and
/// `ghost` (listed without a tree)
#[derive(RustEmbed)]
#[folder = "testdata/templates/"]
pub struct TestTemplates;

/// Minimal product used across the library's tests
#[derive(Clone)]
pub struct TestProduct;

impl ProductConfig for TestProduct {
    type Templates = TestTemplates;

    fn name(&self) -> &'static str {
        "sprout"
    }

    fn display_name(&self) -> &'static str {
        "Sprout"
    }

    fn default_project_name(&self) -> &'static str {
        "my-sprout-app"
    }

    fn dev_dependencies(&self) -> &'static [&'static str] {
        &["typescript", "@types/node", "sprout", "@sprout/types"]
    }

    fn ignore_entries(&self) -> &'static [&'static str] {
        &[".sprout", ".sprout-build"]
    }

    fn env_entry(&self) -> &'static str {
        "VITE_API_URL=http://localhost:3000"
    }

    fn template_dir_env(&self) -> &'static str {
        "SPROUT_TEMPLATE_DIR"
    }

    fn next_steps(
        &self,
        _dir: &Path,
        _mode: Mode,
        _integration: Integration,
        _package_manager: PackageManager,
    ) -> Vec<String> {
        Vec::new()
    }
}

/// One recorded install request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCall {
    pub manager: PackageManager,
    pub dir: PathBuf,
    pub packages: Vec<String>,
}

/// Installer that records requests instead of running a package manager
#[derive(Debug, Default)]
pub struct RecordingInstaller {
    pub calls: Mutex<Vec<InstallCall>>,
    /// When set, every install fails with this stderr
    pub fail_with: Option<String>,
}

impl RecordingInstaller {
    pub fn failing(stderr: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(stderr.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<InstallCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Installer for RecordingInstaller {
    async fn install(
        &self,
        manager: PackageManager,
        project_dir: &Path,
        packages: &[&str],
    ) -> Result<()> {
        self.calls.lock().unwrap().push(InstallCall {
            manager,
            dir: project_dir.to_path_buf(),
            packages: packages.iter().map(|p| p.to_string()).collect(),
        });

        match &self.fail_with {
            Some(stderr) => Err(ScaffoldError::InstallFailed {
                manager,
                code: Some(1),
                stderr: stderr.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Reporter that keeps a flat event log
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

impl RecordingReporter {
    /// Labels of the steps that failed
    pub fn failed_steps(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| e.strip_prefix("failed: "))
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn step_started(&mut self, label: &str) {
        self.events.push(format!("start: {}", label));
    }

    fn step_finished(&mut self, label: &str, outcome: &StepOutcome) {
        let event = match outcome {
            StepOutcome::Succeeded(message) => format!("done: {}: {}", label, message),
            StepOutcome::Skipped(message) => format!("skipped: {}: {}", label, message),
        };
        self.events.push(event);
    }

    fn step_failed(&mut self, label: &str, _error: &ScaffoldError) {
        self.events.push(format!("failed: {}", label));
    }

    fn warning(&mut self, message: &str) {
        self.events.push(format!("warning: {}", message));
    }
}
