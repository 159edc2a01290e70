//! Delegation to an external package manager.
//!
//! Projects whose library was installed by Bower are updated by running
//! `bower update ionic`; its output streams straight to the terminal.

use crate::core::IonicError;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;

/// External package manager invoked for Bower-managed libraries.
#[derive(Debug, Clone)]
pub struct PackageManager {
    program: String,
}

impl Default for PackageManager {
    fn default() -> Self {
        Self::bower()
    }
}

impl PackageManager {
    #[must_use]
    pub fn bower() -> Self {
        Self::with_program("bower")
    }

    /// Use a different executable name or path.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `<program> update <package>` in `cwd`, inheriting stdout/stderr.
    pub async fn update(&self, package: &str, cwd: &Path) -> Result<(), IonicError> {
        let executable =
            which::which(&self.program).map_err(|_| IonicError::PackageManagerNotFound {
                name: self.program.clone(),
            })?;

        let command_line = format!("{} update {}", self.program, package);
        info!("Running '{command_line}' in {}", cwd.display());

        let status = Command::new(executable)
            .arg("update")
            .arg(package)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| IonicError::PackageManagerFailed {
                command: command_line.clone(),
                status: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(IonicError::PackageManagerFailed {
                command: command_line,
                status: status.to_string(),
            })
        }
    }
}
