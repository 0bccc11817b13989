//! Product configuration trait for CLI binaries
//!
//! The workflows never hard-code the tool being installed. Everything that
//! names the product (packages, scripts, ignore entries, env keys) comes
//! from this trait, implemented once per binary.

use crate::project::{Integration, Mode};
use crate::runtime::PackageManager;
use rust_embed::RustEmbed;
use std::path::Path;

/// Configuration trait for products scaffolded by this library
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Template tree compiled into the product binary
    ///
    /// The root holds the `template.yaml` catalogue and one directory per
    /// template.
    type Templates: RustEmbed;

    /// Internal product name (used in scripts and ignore entries)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Project name used when none is given on the command line
    fn default_project_name(&self) -> &'static str;

    /// Command the generated `dev` / `dev:server` scripts run
    fn dev_command(&self) -> String {
        format!("{} dev", self.name())
    }

    /// Development dependencies installed for a fresh project
    fn dev_dependencies(&self) -> &'static [&'static str];

    /// Process-orchestration helper added when augmenting a project
    fn orchestration_package(&self) -> &'static str {
        "concurrently"
    }

    /// Entries appended to an existing `.gitignore`
    fn ignore_entries(&self) -> &'static [&'static str];

    /// `KEY=value` line written to the environment file for front-end integration
    fn env_entry(&self) -> &'static str;

    /// Environment variable pointing at an on-disk template directory
    fn template_dir_env(&self) -> &'static str;

    /// Template used when none is requested
    fn default_template(&self) -> &'static str {
        "basic"
    }

    /// Generate the "next steps" instructions after a successful run
    fn next_steps(
        &self,
        dir: &Path,
        mode: Mode,
        integration: Integration,
        package_manager: PackageManager,
    ) -> Vec<String>;

    /// Dependency list for the given mode, in install order
    fn dependencies_for(&self, mode: Mode) -> Vec<&'static str> {
        let mut deps = self.dev_dependencies().to_vec();
        if mode == Mode::Augment {
            deps.push(self.orchestration_package());
        }
        deps
    }

    /// Block appended to `.gitignore`, headed by a product comment
    fn ignore_block(&self) -> String {
        let mut block = format!("\n# {}\n", self.name());
        for entry in self.ignore_entries() {
            block.push_str(entry);
            block.push('\n');
        }
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestProduct;

    #[test]
    fn test_augment_adds_orchestration_helper() {
        let create = TestProduct.dependencies_for(Mode::Create);
        let augment = TestProduct.dependencies_for(Mode::Augment);

        assert_eq!(create, vec!["typescript", "@types/node", "sprout", "@sprout/types"]);
        assert_eq!(augment.len(), create.len() + 1);
        assert_eq!(augment.last(), Some(&"concurrently"));
    }

    #[test]
    fn test_ignore_block_format() {
        assert_eq!(
            TestProduct.ignore_block(),
            "\n# sprout\n.sprout\n.sprout-build\n"
        );
    }

    #[test]
    fn test_dev_command() {
        assert_eq!(TestProduct.dev_command(), "sprout dev");
    }
}
