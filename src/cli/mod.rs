//! Command-line interface for the Ionic CLI.
//!
//! Two commands are available:
//!
//! - `lib` - show the installed Ionic library version next to the latest
//!   release, or replace it with `lib update` (alias `up`)
//! - `login` - obtain a dashboard session, reusing a stored one when valid
//!
//! # Global Options
//!
//! All commands support these global options:
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//! - `--no-progress` - Disable progress bars
//! - `--config` - Path to a custom config file
//! - `--project-dir` - Project root to operate on instead of the working directory
//!
//! # Example
//!
//! ```bash
//! # Compare the local library with the latest release
//! ionic lib
//!
//! # Install a specific release without confirmation
//! ionic lib update --version 1.3.0 --yes
//!
//! # Log in non-interactively
//! IONIC_EMAIL=me@example.com IONIC_PASSWORD=secret ionic login
//! ```

pub mod common;
mod library;
mod login;


pub use common::CommandContext;
pub use library::{LibAction, LibCommand, UpdateArgs};
pub use login::LoginCommand;

use crate::utils::TerminalPrompter;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Runtime configuration for CLI execution.
///
/// Holds everything derived from global flags so commands never read or
/// mutate process-wide state themselves.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    ///
    /// - `"error"` with `--quiet`
    /// - `"debug"` with `--verbose`
    /// - `"warn"` otherwise
    pub log_level: Option<String>,

    /// Disable progress bars.
    pub no_progress: bool,

    /// Custom path to the global configuration file.
    pub config_path: Option<PathBuf>,

    /// Project root; the working directory when `None`.
    pub project_dir: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    #[must_use]
    pub const fn with_no_progress(mut self, no_progress: bool) -> Self {
        self.no_progress = no_progress;
        self
    }

    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_project_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(path.into());
        self
    }

    /// Filter directive for the tracing subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }
}

#[derive(Parser)]
#[command(
    name = "ionic",
    about = "Ionic CLI - keep the Ionic library current and sign in to the dashboard",
    version,
    long_about = "Checks and updates the Ionic library vendored under www/lib/ionic, and logs in to the Ionic dashboard."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the global config file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Project root containing the www directory
    #[arg(long, global = true, value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Disable progress bars
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or update the Ionic library version of this project
    Lib(LibCommand),

    /// Log in to the Ionic dashboard
    Login(LoginCommand),
}

impl Cli {
    /// Run the selected command with configuration derived from the flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            no_progress: self.no_progress,
            config_path: self.config.clone(),
            project_dir: self.project_dir.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let context = CommandContext::from_cli_config(&config).await?;
        let prompter = TerminalPrompter::new();

        match self.command {
            Commands::Lib(cmd) => cmd.execute(&context, &prompter).await,
            Commands::Login(cmd) => cmd.execute(&context, &prompter).await,
        }
    }
}
