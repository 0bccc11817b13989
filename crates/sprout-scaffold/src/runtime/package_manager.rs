//! Package manager detection from the invoking agent

use clap::ValueEnum;
use std::collections::HashMap;
use std::fmt;

/// Environment variable package managers set when they launch a binary
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Detect the package manager that invoked us
    ///
    /// The user agent looks like `pnpm/9.1.0 npm/? node/v20.11.0 linux x64`.
    /// Anything that isn't recognisably pnpm or bun (including an unset or
    /// empty value) falls back to npm.
    pub fn detect(env: &impl EnvProvider) -> Self {
        let user_agent = env.var(USER_AGENT_ENV).unwrap_or_default();
        Self::from_user_agent(&user_agent)
    }

    pub fn from_user_agent(user_agent: &str) -> Self {
        if user_agent.starts_with("pnpm") {
            PackageManager::Pnpm
        } else if user_agent.starts_with("bun") {
            PackageManager::Bun
        } else {
            PackageManager::Npm
        }
    }

    /// Binary name on PATH
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Prefix for executing a published package without installing it
    pub fn exec_prefix(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npx",
            PackageManager::Pnpm => "pnpm dlx",
            PackageManager::Bun => "bunx",
        }
    }

    /// Prefix for running a package.json script
    pub fn run_prefix(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm run",
            PackageManager::Pnpm => "pnpm run",
            PackageManager::Bun => "bun run",
        }
    }

    /// Argument list that installs `packages` as development dependencies
    pub fn install_args(&self, packages: &[&str]) -> Vec<String> {
        let head: &[&str] = match self {
            PackageManager::Npm => &["install", "--save-dev"],
            PackageManager::Pnpm => &["add", "--save-dev"],
            PackageManager::Bun => &["add", "--development"],
        };
        head.iter()
            .chain(packages.iter())
            .map(|s| s.to_string())
            .collect()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.binary())
    }
}

/// Source of environment variables
///
/// Detection goes through this so tests can supply values without touching
/// the real process environment.
pub trait EnvProvider {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads from the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvProvider for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvProvider for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
