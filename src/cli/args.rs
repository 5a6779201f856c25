//! Command line argument definitions.
//!
//! Usage errors are reported by clap and exit with status 2.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Site preflight validation
#[derive(Debug, Clone, Parser)]
#[command(name = "site-preflight")]
#[command(about = "Preflight checks for a Hugo site: configuration, content, and toolchain")]
#[command(disable_version_flag = true)]
pub struct Args {
    /// Project root used to resolve default paths
    #[arg(long, global = true, env = "SITE_PREFLIGHT_REPO_ROOT", value_name = "DIR")]
    pub repo_root: Option<PathBuf>,

    /// TOML file overriding display limits and timeouts
    #[arg(long, global = true, env = "SITE_PREFLIGHT_SETTINGS", value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// List every finding, including info suggestions and confirmations
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print unmet findings and the status line
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Validate the site configuration file
    Config {
        /// Configuration file [default: <repo-root>/config.toml]
        path: Option<PathBuf>,
    },
    /// Validate markdown under the content directory
    Content {
        /// Content directory [default: <repo-root>/content]
        dir: Option<PathBuf>,
    },
    /// Check the local development toolchain
    Env,
    /// List all rules
    List,
    /// Show build information
    Version,
}

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_CONTENT_DIR: &str = "content";

impl Args {
    /// Project root, defaulting to the working directory
    pub fn repo_root(&self) -> PathBuf {
        self.repo_root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Colors are used unless disabled by flag or by `NO_COLOR`
    pub fn use_color(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none()
    }
}

/// Path given on the command line, or `default` under the repo root.
pub fn resolve_target(explicit: Option<&Path>, repo_root: &Path, default: &str) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => repo_root.join(default),
    }
}
