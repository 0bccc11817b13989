//! Augment mode: retrofit an existing project

use crate::error::{Result, ScaffoldError};
use crate::product::ProductConfig;
use crate::project::files::{self, EnvUpdate};
use crate::project::manifest::{self, MANIFEST_FILE};
use crate::project::routes::{self, ROUTES_DIR};
use crate::project::{Integration, ProjectDescriptor};
use crate::runtime::{Installer, PackageManager};
use crate::workflow::{run_step, Reporter, StepOutcome};

/// Scripts merged into the existing manifest
pub fn augment_scripts<C: ProductConfig>(
    config: &C,
    integration: Integration,
    package_manager: PackageManager,
) -> Vec<(&'static str, String)> {
    let mut scripts = vec![("dev:server", config.dev_command())];
    if integration == Integration::Vite {
        let run = package_manager.run_prefix();
        scripts.push((
            "dev:all",
            format!(
                "{} \"{} dev\" \"{} dev:server\"",
                config.orchestration_package(),
                run,
                run
            ),
        ));
    }
    scripts
}

/// Add the API server to a project that already has a package.json
///
/// Installs dependencies, merges scripts, creates `routes/`, updates
/// .gitignore and, for Vite projects, the env file. A failure leaves the
/// earlier steps applied; running this twice fails at the routes step.
pub async fn augment_project<C, I, R>(
    config: &C,
    installer: &I,
    reporter: &mut R,
    descriptor: &ProjectDescriptor,
) -> Result<()>
where
    C: ProductConfig,
    I: Installer,
    R: Reporter + ?Sized,
{
    let root = descriptor.root_dir();
    let manifest_path = root.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Err(ScaffoldError::ManifestMissing {
            path: root.to_path_buf(),
        });
    }

    let packages = config.dependencies_for(descriptor.mode());
    run_step(reporter, "Installing dependencies", async {
        installer
            .install(descriptor.package_manager(), root, &packages)
            .await?;
        Ok(StepOutcome::Succeeded(format!(
            "Installed {} dev dependencies with {}",
            packages.len(),
            descriptor.package_manager()
        )))
    })
    .await?;

    let scripts = augment_scripts(config, descriptor.integration(), descriptor.package_manager());
    run_step(reporter, "Updating package.json scripts", async {
        manifest::merge_manifest_scripts(root, &scripts).await?;
        let keys: Vec<&str> = scripts.iter().map(|(k, _)| *k).collect();
        Ok(StepOutcome::Succeeded(format!("Added {}", keys.join(", "))))
    })
    .await?;

    run_step(reporter, "Creating routes directory", async {
        routes::create_routes_scaffold(root, config.name()).await?;
        Ok(StepOutcome::Succeeded(format!(
            "Created {}/ with {} and {}",
            ROUTES_DIR,
            routes::README_FILE,
            routes::EXAMPLE_ROUTE_FILE
        )))
    })
    .await?;

    run_step(reporter, "Updating .gitignore", async {
        match files::append_ignore_block(root, &config.ignore_block()).await? {
            Some(_) => Ok(StepOutcome::Succeeded(format!(
                "Ignored {} build output",
                config.display_name()
            ))),
            None => Ok(StepOutcome::Skipped(format!(
                "No {} found",
                files::IGNORE_FILE
            ))),
        }
    })
    .await?;

    if descriptor.integration() == Integration::Vite {
        run_step(reporter, "Updating environment file", async {
            let message = match files::update_env_file(root, config.env_entry()).await? {
                EnvUpdate::Appended(path) => format!("Appended to {}", display_name(&path)),
                EnvUpdate::Created(path) => format!("Created {}", display_name(&path)),
            };
            Ok(StepOutcome::Succeeded(message))
        })
        .await?;
    }

    Ok(())
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ScaffoldOptions;
    use crate::testing::{RecordingInstaller, RecordingReporter, TestProduct};
    use serde_json::Value;
    use std::fs as stdfs;
    use std::path::Path;

    const EXISTING_MANIFEST: &str = r#"{
  "name": "site",
  "version": "1.2.0",
  "scripts": {
    "dev": "vite",
    "build": "vite build"
  }
}
"#;

    fn descriptor(cwd: &Path, vite: bool, pm: PackageManager) -> ProjectDescriptor {
        let options = ScaffoldOptions::from_flags(false, !vite, vite, false, pm).unwrap();
        ProjectDescriptor::new(None, "my-sprout-app", options, cwd)
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        stdfs::write(dir.path().join("package.json"), EXISTING_MANIFEST).unwrap();
        dir
    }

    fn read_manifest(root: &Path) -> Value {
        serde_json::from_str(&stdfs::read_to_string(root.join("package.json")).unwrap()).unwrap()
    }

    #[test]
    fn test_vite_scripts_use_package_manager() {
        let scripts = augment_scripts(&TestProduct, Integration::Vite, PackageManager::Bun);
        assert_eq!(
            scripts,
            vec![
                ("dev:server", "sprout dev".to_string()),
                (
                    "dev:all",
                    "concurrently \"bun run dev\" \"bun run dev:server\"".to_string()
                ),
            ]
        );

        let plain = augment_scripts(&TestProduct, Integration::None, PackageManager::Bun);
        assert_eq!(plain.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_manifest_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let installer = RecordingInstaller::default();
        let mut reporter = RecordingReporter::default();
        let desc = descriptor(dir.path(), false, PackageManager::Npm);

        let err = augment_project(&TestProduct, &installer, &mut reporter, &desc)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::ManifestMissing { .. }));
        assert!(installer.calls().is_empty());
        assert!(reporter.events.is_empty());
        assert_eq!(stdfs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_full_augment_run() {
        let dir = project();
        stdfs::write(dir.path().join(".gitignore"), "node_modules\n").unwrap();
        let installer = RecordingInstaller::default();
        let mut reporter = RecordingReporter::default();
        let desc = descriptor(dir.path(), false, PackageManager::Npm);

        augment_project(&TestProduct, &installer, &mut reporter, &desc)
            .await
            .unwrap();

        let manifest = read_manifest(dir.path());
        assert_eq!(manifest["scripts"]["dev:server"], "sprout dev");
        assert_eq!(manifest["scripts"]["dev"], "vite");
        assert_eq!(manifest["scripts"]["build"], "vite build");
        assert_eq!(manifest["version"], "1.2.0");
        assert!(manifest["scripts"].get("dev:all").is_none());

        assert!(dir.path().join("routes/README.md").is_file());
        assert!(dir.path().join("routes/users.ts").is_file());
        assert_eq!(
            stdfs::read_to_string(dir.path().join(".gitignore")).unwrap(),
            "node_modules\n\n# sprout\n.sprout\n.sprout-build\n"
        );
        assert!(!dir.path().join(".env.local").exists());

        let calls = installer.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].packages.last().map(String::as_str), Some("concurrently"));
        assert_eq!(calls[0].dir, dir.path());
    }

    #[tokio::test]
    async fn test_gitignore_absent_is_skipped() {
        let dir = project();
        let installer = RecordingInstaller::default();
        let mut reporter = RecordingReporter::default();
        let desc = descriptor(dir.path(), false, PackageManager::Npm);

        augment_project(&TestProduct, &installer, &mut reporter, &desc)
            .await
            .unwrap();

        assert!(!dir.path().join(".gitignore").exists());
        assert!(reporter
            .events
            .iter()
            .any(|e| e.starts_with("skipped: Updating .gitignore")));
    }

    #[tokio::test]
    async fn test_vite_integration_adds_dev_all_and_env() {
        let dir = project();
        stdfs::write(dir.path().join(".env"), "PORT=5173\n").unwrap();
        let installer = RecordingInstaller::default();
        let mut reporter = RecordingReporter::default();
        let desc = descriptor(dir.path(), true, PackageManager::Pnpm);

        augment_project(&TestProduct, &installer, &mut reporter, &desc)
            .await
            .unwrap();

        let manifest = read_manifest(dir.path());
        assert_eq!(
            manifest["scripts"]["dev:all"],
            "concurrently \"pnpm run dev\" \"pnpm run dev:server\""
        );
        assert_eq!(
            stdfs::read_to_string(dir.path().join(".env")).unwrap(),
            "PORT=5173\nVITE_API_URL=http://localhost:3000\n"
        );
    }

    #[tokio::test]
    async fn test_existing_routes_fails_after_install_and_merge() {
        let dir = project();
        stdfs::create_dir(dir.path().join("routes")).unwrap();
        let installer = RecordingInstaller::default();
        let mut reporter = RecordingReporter::default();
        let desc = descriptor(dir.path(), false, PackageManager::Npm);

        let err = augment_project(&TestProduct, &installer, &mut reporter, &desc)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::RoutesDirectoryExists { .. }));
        assert_eq!(installer.calls().len(), 1);
        assert_eq!(read_manifest(dir.path())["scripts"]["dev:server"], "sprout dev");
        assert_eq!(reporter.failed_steps(), vec!["Creating routes directory"]);
        assert!(!dir.path().join("routes/README.md").exists());
    }

    #[tokio::test]
    async fn test_second_run_fails_at_routes_step() {
        let dir = project();
        let installer = RecordingInstaller::default();
        let desc = descriptor(dir.path(), false, PackageManager::Npm);

        let mut first = RecordingReporter::default();
        augment_project(&TestProduct, &installer, &mut first, &desc)
            .await
            .unwrap();

        let mut second = RecordingReporter::default();
        let err = augment_project(&TestProduct, &installer, &mut second, &desc)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::RoutesDirectoryExists { .. }));
        assert_eq!(second.failed_steps(), vec!["Creating routes directory"]);
        assert_eq!(installer.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_install_failure_stops_before_manifest() {
        let dir = project();
        let installer = RecordingInstaller::failing("network down");
        let mut reporter = RecordingReporter::default();
        let desc = descriptor(dir.path(), false, PackageManager::Npm);

        let err = augment_project(&TestProduct, &installer, &mut reporter, &desc)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::InstallFailed { .. }));
        assert_eq!(
            stdfs::read_to_string(dir.path().join("package.json")).unwrap(),
            EXISTING_MANIFEST
        );
        assert!(!dir.path().join("routes").exists());
    }
}
