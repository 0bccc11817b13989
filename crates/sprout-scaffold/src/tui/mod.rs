//! CLI front-end using cliclack (Charm-style inline output)
//!
//! This module is optional and only available when the `tui` feature is enabled.

mod reporter;

pub use reporter::SpinnerReporter;

use crate::error::{Result, ScaffoldError};
use crate::product::ProductConfig;
use crate::project::{self, Mode, ProjectDescriptor, ScaffoldOptions};
use crate::runtime::{CommandInstaller, EnvProvider, Installer, PackageManager, ProcessEnv};
use crate::templates;
use crate::workflow::{PlainReporter, Reporter};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Arguments for a run, as parsed from the command line
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    /// Project name (create mode only)
    pub name: Option<String>,

    /// Augment the project in the current directory
    pub existing: bool,

    /// Augment the current directory with Vite integration
    pub vite: bool,

    /// Package manager override; detected when absent
    pub package_manager: Option<PackageManager>,

    /// Template name to use
    pub template: Option<String>,

    /// On-disk template directory used instead of the bundled templates
    pub template_dir: Option<PathBuf>,
}

/// Run the CLI: validate arguments, run the workflow, print next steps
pub async fn run<C: ProductConfig>(config: &C, args: RunArgs, cli_version: &str) -> Result<()> {
    let package_manager = args
        .package_manager
        .unwrap_or_else(|| PackageManager::detect(&ProcessEnv));
    let options = ScaffoldOptions::from_flags(
        args.name.is_some(),
        args.existing,
        args.vite,
        args.template.is_some() || args.template_dir.is_some(),
        package_manager,
    )?;

    let cwd = std::env::current_dir()
        .map_err(|e| ScaffoldError::io("read current directory", ".", e))?;
    let descriptor = ProjectDescriptor::new(
        args.name.as_deref(),
        config.default_project_name(),
        options,
        &cwd,
    );
    tracing::debug!(
        mode = %descriptor.mode(),
        package_manager = %descriptor.package_manager(),
        root = %descriptor.root_dir().display(),
        "resolved project"
    );

    let installer = CommandInstaller;
    if std::io::stdout().is_terminal() {
        cliclack::intro(config.display_name()).map_err(terminal_error)?;
        let mut reporter = SpinnerReporter::new();
        execute(config, &args, &descriptor, cli_version, &installer, &mut reporter, &ProcessEnv)
            .await?;
        print_next_steps(config, &descriptor, &cwd);
        cliclack::outro("Happy coding!").map_err(terminal_error)?;
    } else {
        let mut reporter = PlainReporter;
        execute(config, &args, &descriptor, cli_version, &installer, &mut reporter, &ProcessEnv)
            .await?;
        print_next_steps(config, &descriptor, &cwd);
    }

    Ok(())
}

fn terminal_error(e: std::io::Error) -> ScaffoldError {
    ScaffoldError::io("write to", "terminal", e)
}

/// Pick the template (create mode only) and run the workflow for `descriptor`
///
/// Template lookup happens before any step runs, so an unknown template
/// leaves the filesystem untouched.
async fn execute<C, I, R>(
    config: &C,
    args: &RunArgs,
    descriptor: &ProjectDescriptor,
    cli_version: &str,
    installer: &I,
    reporter: &mut R,
    env: &impl EnvProvider,
) -> Result<()>
where
    C: ProductConfig,
    I: Installer,
    R: Reporter,
{
    match descriptor.mode() {
        Mode::Create => {
            let source =
                templates::resolve_template_source(config, args.template_dir.as_deref(), env);
            let name = args.template.as_deref().unwrap_or(config.default_template());
            let template = templates::select_template::<C::Templates>(&source, name)?;
            tracing::debug!(
                template = %template.entry.name,
                source = ?template.source,
                "selected template"
            );

            if let Some(warning) = template
                .entry
                .version
                .as_deref()
                .and_then(|v| templates::check_compatibility(cli_version, v))
            {
                reporter.warning(&warning);
            }

            project::create_project(config, installer, reporter, descriptor, &template).await
        }
        Mode::Augment => project::augment_project(config, installer, reporter, descriptor).await,
    }
}

fn print_next_steps<C: ProductConfig>(config: &C, descriptor: &ProjectDescriptor, cwd: &Path) {
    let dir = descriptor
        .root_dir()
        .strip_prefix(cwd)
        .unwrap_or(descriptor.root_dir());
    let steps = config.next_steps(
        dir,
        descriptor.mode(),
        descriptor.integration(),
        descriptor.package_manager(),
    );
    if steps.is_empty() {
        return;
    }

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();
}
