//! Dependency installation through an external package manager

use crate::error::{Result, ScaffoldError};
use crate::runtime::PackageManager;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// Installs development dependencies into a project
///
/// The workflows only talk to this trait, so tests can record install
/// requests instead of shelling out.
pub trait Installer {
    fn install(
        &self,
        manager: PackageManager,
        project_dir: &Path,
        packages: &[&str],
    ) -> impl Future<Output = Result<()>>;
}

/// Runs the real package manager binary
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandInstaller;

impl Installer for CommandInstaller {
    async fn install(
        &self,
        manager: PackageManager,
        project_dir: &Path,
        packages: &[&str],
    ) -> Result<()> {
        let args = manager.install_args(packages);
        run_package_manager(manager, manager.binary(), &args, project_dir).await
    }
}

/// Spawn `program` with `args` in `cwd` and wait for it to exit
///
/// There is no timeout: a hung package manager hangs the run. Output is
/// captured so the child's stderr can be surfaced on failure.
pub(crate) async fn run_package_manager(
    manager: PackageManager,
    program: &str,
    args: &[String],
    cwd: &Path,
) -> Result<()> {
    tracing::debug!(
        program,
        args = %args.join(" "),
        cwd = %cwd.display(),
        "spawning package manager"
    );

    let output = TokioCommand::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| ScaffoldError::InstallSpawn { manager, source })?;

    if output.status.success() {
        tracing::debug!(program, "package manager finished");
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    tracing::debug!(program, code = ?output.status.code(), "package manager failed");
    Err(ScaffoldError::InstallFailed {
        manager,
        code: output.status.code(),
        stderr,
    })
}
