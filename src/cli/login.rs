//! `ionic login`.

use super::CommandContext;
use crate::auth::{CredentialFlags, SessionSource};
use crate::constants::{EMAIL_ENV, PASSWORD_ENV};
use crate::utils::Prompter;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

/// Log in to the Ionic dashboard.
///
/// With both an email and a password the login always goes to the network
/// and the session is not saved. With neither, a stored session is reused
/// while valid; otherwise the credentials are prompted for and the new
/// session is saved.
#[derive(Debug, Default, Args)]
pub struct LoginCommand {
    /// Account email
    #[arg(short, long, env = EMAIL_ENV, value_name = "EMAIL")]
    pub email: Option<String>,

    /// Account password
    #[arg(short, long, env = PASSWORD_ENV, hide_env_values = true, value_name = "PASSWORD")]
    pub password: Option<String>,
}

impl LoginCommand {
    pub async fn execute(self, context: &CommandContext, prompter: &dyn Prompter) -> Result<()> {
        let flags = CredentialFlags {
            email: self.email,
            password: self.password,
        };

        let mut manager = context.session_manager().await?;
        let outcome = manager.ensure_session(&flags, prompter).await?;

        if outcome.source == SessionSource::Cache {
            println!("{} {}", "Already logged in to".green(), manager.dashboard_url());
        }
        Ok(())
    }
}
