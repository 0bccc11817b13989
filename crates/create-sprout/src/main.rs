//! create-sprout - Project scaffolding for Sprout API servers

use anyhow::Result;
use clap::Parser;
use rust_embed::RustEmbed;
use sprout_scaffold::{Integration, Mode, PackageManager, ProductConfig, RunArgs};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter
const LOG_ENV: &str = "SPROUT_LOG";

/// Template catalogue and trees shipped inside the binary
#[derive(RustEmbed)]
#[folder = "templates/"]
pub struct SproutTemplates;

/// Sprout product configuration
#[derive(Clone)]
pub struct SproutConfig;

impl ProductConfig for SproutConfig {
    type Templates = SproutTemplates;

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
        dir: &Path,
        mode: Mode,
        integration: Integration,
        package_manager: PackageManager,
    ) -> Vec<String> {
        let run = package_manager.run_prefix();
        match (mode, integration) {
            (Mode::Create, _) => vec![
                format!("cd {}", dir.display()),
                format!("{} dev", run),
            ],
            (Mode::Augment, Integration::Vite) => vec![
                format!("{} dev:all", run),
                "Add more routes under routes/".to_string(),
            ],
            (Mode::Augment, Integration::None) => vec![
                format!("{} dev:server", run),
                "Add more routes under routes/".to_string(),
            ],
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-sprout")]
#[command(about = "CLI for scaffolding Sprout API projects")]
#[command(version)]
pub struct Args {
    /// Name of the project directory to create
    pub name: Option<String>,

    /// Add Sprout to the existing project in the current directory
    #[arg(long)]
    pub existing: bool,

    /// Add Sprout to the Vite project in the current directory
    #[arg(long)]
    pub vite: bool,

    /// Package manager to install with (detected from the invoking tool by default)
    #[arg(long = "use", value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Template name to use
    #[arg(short, long)]
    pub template: Option<String>,

    /// Local template directory used instead of the bundled templates (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Print debug logs
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<Args> for RunArgs {
    fn from(args: Args) -> Self {
        RunArgs {
            name: args.name,
            existing: args.existing,
            vite: args.vite,
            package_manager: args.package_manager,
            template: args.template,
            template_dir: args.template_dir,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    // Usage errors exit with 1 like every other failure; --help/--version exit 0
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    init_tracing(args.verbose);

    let config = SproutConfig;
    let result = sprout_scaffold::run(&config, args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_name_and_package_manager() {
        let args = Args::try_parse_from(["create-sprout", "api", "--use", "pnpm"]).unwrap();
        assert_eq!(args.name.as_deref(), Some("api"));
        assert_eq!(args.package_manager, Some(PackageManager::Pnpm));
        assert!(!args.existing);
        assert!(!args.vite);
    }

    #[test]
    fn test_modifier_flags_pass_through() {
        let run: RunArgs = Args::try_parse_from(["create-sprout", "--vite"])
            .unwrap()
            .into();
        assert!(run.vite);
        assert!(run.name.is_none());
        assert!(run.package_manager.is_none());
    }

    #[test]
    fn test_unknown_package_manager_rejected() {
        assert!(Args::try_parse_from(["create-sprout", "--use", "yarn"]).is_err());
    }

    #[test]
    fn test_next_steps_create() {
        let steps = SproutConfig.next_steps(
            Path::new("api"),
            Mode::Create,
            Integration::None,
            PackageManager::Bun,
        );
        assert_eq!(steps, vec!["cd api", "bun run dev"]);
    }

    #[test]
    fn test_next_steps_augment() {
        let vite = SproutConfig.next_steps(
            Path::new(""),
            Mode::Augment,
            Integration::Vite,
            PackageManager::Npm,
        );
        assert_eq!(vite[0], "npm run dev:all");

        let plain = SproutConfig.next_steps(
            Path::new(""),
            Mode::Augment,
            Integration::None,
            PackageManager::Pnpm,
        );
        assert_eq!(plain[0], "pnpm run dev:server");
    }

    #[tokio::test]
    async fn test_default_template_is_bundled() {
        use sprout_scaffold::templates::{select_template, TemplateSource};

        let selected = select_template::<SproutTemplates>(
            &TemplateSource::Bundled,
            SproutConfig.default_template(),
        )
        .unwrap();
        assert!(selected.entry.version.is_some());

        let target = tempfile::tempdir().unwrap();
        let copied = selected
            .copy_into::<SproutTemplates>(target.path())
            .await
            .unwrap();
        assert!(copied.contains(&PathBuf::from(".gitignore")));
        assert!(target.path().join("tsconfig.json").is_file());
        assert!(target.path().join("routes/hello.ts").is_file());
        assert!(!target.path().join("template.yaml").exists());
    }

    #[tokio::test]
    async fn test_template_flag_rejected_when_augmenting() {
        let run: RunArgs = Args::try_parse_from(["create-sprout", "--existing", "-t", "basic"])
            .unwrap()
            .into();
        let err = sprout_scaffold::run(&SproutConfig, run, CLI_VERSION)
            .await
            .unwrap_err();
        assert!(matches!(err, sprout_scaffold::ScaffoldError::InvalidArguments(_)));
    }
}
