//! Create mode: materialize a new project from a template

use crate::error::{Result, ScaffoldError};
use crate::product::ProductConfig;
use crate::project::manifest::{self, PackageManifest};
use crate::project::ProjectDescriptor;
use crate::runtime::Installer;
use crate::templates::SelectedTemplate;
use crate::workflow::{run_step, Reporter, StepOutcome};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Create the project directory, write its manifest, copy the template and
/// install dependencies, in that order
///
/// Stops at the first failing step; earlier steps are not undone.
pub async fn create_project<C, I, R>(
    config: &C,
    installer: &I,
    reporter: &mut R,
    descriptor: &ProjectDescriptor,
    template: &SelectedTemplate,
) -> Result<()>
where
    C: ProductConfig,
    I: Installer,
    R: Reporter + ?Sized,
{
    let root = descriptor.root_dir();

    run_step(reporter, "Creating project directory", prepare_directory(root)).await?;

    run_step(reporter, "Writing package.json", async {
        let manifest = PackageManifest::new(descriptor.package_name(), config.dev_command());
        manifest::write_manifest(root, &manifest).await?;
        Ok(StepOutcome::Succeeded(format!(
            "Wrote {} with a dev script",
            manifest::MANIFEST_FILE
        )))
    })
    .await?;

    run_step(reporter, "Copying template files", async {
        let copied = template.copy_into::<C::Templates>(root).await?;
        Ok(StepOutcome::Succeeded(format!(
            "Copied {} files from the {} template",
            copied.len(),
            template.entry.name
        )))
    })
    .await?;

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

    Ok(())
}

/// Make sure `root` is a new or empty directory
///
/// Only the final segment is created; a missing parent is an error.
async fn prepare_directory(root: &Path) -> Result<StepOutcome> {
    match fs::symlink_metadata(root).await {
        Ok(meta) if meta.is_dir() => {
            let mut entries = fs::read_dir(root)
                .await
                .map_err(|e| ScaffoldError::io("read", root, e))?;
            let first = entries
                .next_entry()
                .await
                .map_err(|e| ScaffoldError::io("read", root, e))?;
            if first.is_some() {
                return Err(ScaffoldError::DirectoryNotEmpty {
                    path: root.to_path_buf(),
                });
            }
            Ok(StepOutcome::Succeeded(format!(
                "Using empty directory {}",
                root.display()
            )))
        }
        Ok(_) => Err(ScaffoldError::DirectoryNotEmpty {
            path: root.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::create_dir(root)
                .await
                .map_err(|e| ScaffoldError::io("create directory", root, e))?;
            Ok(StepOutcome::Succeeded(format!("Created {}", root.display())))
        }
        Err(e) => Err(ScaffoldError::io("inspect", root, e)),
    }
}
