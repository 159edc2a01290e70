//! Move-aside backup of the installed library directory.
//!
//! An update renames `www/lib/ionic` to `www/lib/ionic.backup` before the new
//! archive is unpacked. Success removes the backup; any failure puts it back,
//! so the library directory ends up either fully old or fully new.
//!
//! A backup left behind by a failed restore is only replaced when the library
//! directory holds a version descriptor again. Otherwise the backup may be the
//! only copy of the previous install and staging refuses to touch it.

use crate::constants::{BOWER_DESCRIPTOR, VERSION_DESCRIPTOR};
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Manages the backup sibling of a library directory.
pub struct LibraryBackup {
    original_path: PathBuf,
    backup_path: PathBuf,
    has_backup: bool,
}

impl LibraryBackup {
    #[must_use]
    pub const fn new(original_path: PathBuf, backup_path: PathBuf) -> Self {
        Self {
            original_path,
            backup_path,
            has_backup: false,
        }
    }

    /// Move the current directory aside, if there is one, and recreate it empty.
    pub async fn create_backup(&mut self) -> Result<()> {
        if self.backup_path.exists() {
            if !self.original_is_installed() {
                bail!(
                    "{} exists but {} has no installed library; the backup may be the only copy \
                     of the previous install. Move it back to {} or delete it, then retry",
                    self.backup_path.display(),
                    self.original_path.display(),
                    self.original_path.display()
                );
            }
            debug!("Removing stale backup at {}", self.backup_path.display());
            fs::remove_dir_all(&self.backup_path)
                .await
                .with_context(|| format!("Failed to remove old backup {}", self.backup_path.display()))?;
        }

        if self.original_path.exists() {
            info!("Moving {} aside to {}", self.original_path.display(), self.backup_path.display());
            fs::rename(&self.original_path, &self.backup_path).await.with_context(|| {
                format!(
                    "Failed to move {} to {}",
                    self.original_path.display(),
                    self.backup_path.display()
                )
            })?;
            self.has_backup = true;
        }

        if let Err(e) = fs::create_dir_all(&self.original_path).await {
            let state = match self.restore_backup().await {
                Ok(()) => "the previous library was put back".to_string(),
                Err(restore) => format!(
                    "the previous library is still at {} ({restore:#})",
                    self.backup_path.display()
                ),
            };
            bail!("Failed to create {}: {e}; {state}", self.original_path.display());
        }

        Ok(())
    }

    fn original_is_installed(&self) -> bool {
        [VERSION_DESCRIPTOR, BOWER_DESCRIPTOR]
            .iter()
            .any(|name| self.original_path.join(name).is_file())
    }

    /// Discard whatever is at the original path and move the backup back.
    pub async fn restore_backup(&mut self) -> Result<()> {
        if self.original_path.exists() {
            fs::remove_dir_all(&self.original_path).await.with_context(|| {
                format!("Failed to remove partial install {}", self.original_path.display())
            })?;
        }

        if !self.has_backup {
            return Ok(());
        }

        warn!("Restoring previous library from {}", self.backup_path.display());
        fs::rename(&self.backup_path, &self.original_path).await.with_context(|| {
            format!(
                "Failed to move {} back to {}",
                self.backup_path.display(),
                self.original_path.display()
            )
        })?;
        self.has_backup = false;
        Ok(())
    }

    /// Delete the backup after a successful update.
    pub async fn cleanup_backup(&mut self) -> Result<()> {
        if self.has_backup {
            debug!("Cleaning up backup at {}", self.backup_path.display());
            fs::remove_dir_all(&self.backup_path).await.context("Failed to remove backup")?;
            self.has_backup = false;
        }
        Ok(())
    }

    #[must_use]
    pub const fn backup_exists(&self) -> bool {
        self.has_backup
    }

    #[must_use]
    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }
}
