//! `ionic lib` and `ionic lib update`.

use super::CommandContext;
use crate::core::IonicError;
use crate::library::{
    LibraryUpdater, UpdateOptions, UpdateOutcome, VersionResolver, VersionStatus,
};
use crate::utils::Prompter;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use tracing::warn;

/// Show the local and latest Ionic library versions, or update the library.
#[derive(Debug, Args)]
pub struct LibCommand {
    #[command(subcommand)]
    pub action: Option<LibAction>,
}

#[derive(Debug, Subcommand)]
pub enum LibAction {
    /// Replace www/lib/ionic with a release archive
    #[command(visible_alias = "up")]
    Update(UpdateArgs),
}

#[derive(Debug, Default, Args)]
pub struct UpdateArgs {
    /// Install this release instead of the latest one
    #[arg(long = "version", value_name = "VERSION")]
    pub version_number: Option<String>,

    /// Replace the library without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

impl LibCommand {
    pub async fn execute(self, context: &CommandContext, prompter: &dyn Prompter) -> Result<()> {
        context.library_paths().require_project()?;

        match self.action {
            None => print_versions(context).await,
            Some(LibAction::Update(args)) => update(context, args, prompter).await,
        }
    }
}

async fn print_versions(context: &CommandContext) -> Result<()> {
    let resolver = VersionResolver::new(context.library_paths(), context.registry()?);
    let report = resolver.report().await;

    match &report.local {
        Ok(Some(local)) => println!(
            "{}{}  ({})",
            "Local Ionic version: ".bold().green(),
            local.version,
            local.source_path.display()
        ),
        Ok(None) => println!("{}", "Unable to load ionic lib version information".bold().red()),
        Err(e) => {
            warn!("{e}");
            println!("{}", "Unable to load ionic lib version information".bold().red());
        }
    }

    let status = report.status();
    let latest = report.remote?;
    println!(
        "{}{}  (released {})",
        "Latest Ionic version: ".bold().green(),
        latest.version_number,
        latest.release_date
    );

    match status {
        Some(VersionStatus::Outdated) => println!("{}", " * Local version is out of date".yellow()),
        Some(VersionStatus::UpToDate) => println!("{}", " * Local version up to date".green()),
        None => {}
    }
    Ok(())
}

async fn update(context: &CommandContext, args: UpdateArgs, prompter: &dyn Prompter) -> Result<()> {
    let updater = LibraryUpdater::new(context.library_paths(), context.registry()?)
        .with_progress(context.show_progress);
    let options = UpdateOptions {
        version: args.version_number,
        assume_yes: args.yes,
    };

    match updater.update(&options, prompter).await {
        Ok(UpdateOutcome::Installed(_) | UpdateOutcome::Delegated) => Ok(()),
        Ok(UpdateOutcome::InstalledUnverified {
            reason,
        }) => {
            println!("{}", format!("Error loading version info: {reason}").bold().red());
            Ok(())
        }
        Err(IonicError::UserDeclined) => {
            println!("{}", "Update cancelled, nothing was changed".yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
