//! Replacing the installed library with a registry archive.
//!
//! # Update Process
//!
//! 1. **Packaging check** - Bower-managed installs are handed to `bower update ionic`
//! 2. **Confirmation** - the user must answer `y`/`yes` before anything changes
//! 3. **Target resolution** - explicit version or the registry's latest release
//! 4. **Staging** - the current directory is moved to `ionic.backup`
//! 5. **Download** - the archive streams into `www/lib/ionic/ionic.zip`
//! 6. **Extraction** - entries are unpacked into `www/lib/ionic`
//! 7. **Verification** - the version descriptor is read back
//! 8. **Commit or rollback** - the backup is removed, or restored on any failure
//!
//! The temporary archive is deleted on every path.

use crate::constants::BOWER_PACKAGE;
use crate::core::IonicError;
use crate::library::backup::LibraryBackup;
use crate::library::bower::record_library_version;
use crate::library::package_manager::PackageManager;
use crate::library::registry::RegistryClient;
use crate::library::resolver::VersionResolver;
use crate::library::version::{LibraryPaths, LocalVersionRecord, Packaging};
use crate::utils::fs::{extract_zip_async, remove_file_if_exists};
use crate::utils::progress::ProgressBar;
use crate::utils::prompt::Prompter;
use futures::StreamExt;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Caller choices for one update.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Install this version instead of the latest release.
    pub version: Option<String>,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
}

/// What an update ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Archive installed and its version descriptor read back.
    Installed(LocalVersionRecord),
    /// Archive installed, but the new version could not be read.
    InstalledUnverified {
        reason: String,
    },
    /// The package manager performed the update.
    Delegated,
}

/// Archive and version a download resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct UpdateTarget {
    version: String,
    url: String,
}

/// Result of streaming an archive to disk.
#[derive(Debug)]
struct DownloadSummary {
    bytes: u64,
    sha256: String,
}

/// Temporary archive removed when dropped.
struct TempArchive {
    path: PathBuf,
}

impl TempArchive {
    fn path(&self) -> &Path {
        &self.path
    }

    fn remove(&self) {
        if let Err(e) = remove_file_if_exists(&self.path) {
            warn!("Failed to remove temporary archive {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for TempArchive {
    fn drop(&mut self) {
        let _ = remove_file_if_exists(&self.path);
    }
}

/// Orchestrates a library update for one project.
///
/// # Examples
///
/// ```rust,no_run
/// use ionic_cli::library::{LibraryPaths, LibraryUpdater, RegistryClient, UpdateOptions};
/// use ionic_cli::utils::TerminalPrompter;
///
/// # async fn example() -> Result<(), ionic_cli::core::IonicError> {
/// let registry = RegistryClient::new("http://code.ionicframework.com", reqwest::Client::new());
/// let updater = LibraryUpdater::new(LibraryPaths::new("."), registry).with_progress(true);
///
/// let outcome = updater.update(&UpdateOptions::default(), &TerminalPrompter::new()).await?;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
pub struct LibraryUpdater {
    paths: LibraryPaths,
    resolver: VersionResolver,
    package_manager: PackageManager,
    show_progress: bool,
}

impl LibraryUpdater {
    #[must_use]
    pub fn new(paths: LibraryPaths, registry: RegistryClient) -> Self {
        Self {
            resolver: VersionResolver::new(paths.clone(), registry),
            paths,
            package_manager: PackageManager::bower(),
            show_progress: false,
        }
    }

    #[must_use]
    pub fn with_package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = package_manager;
        self
    }

    #[must_use]
    pub const fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    /// Run the update workflow.
    ///
    /// An unreadable local descriptor aborts before any change. Declining the
    /// confirmation returns [`IonicError::UserDeclined`] with nothing touched.
    pub async fn update(
        &self,
        options: &UpdateOptions,
        prompter: &dyn Prompter,
    ) -> Result<UpdateOutcome, IonicError> {
        self.paths.require_project()?;

        let local = self.resolver.load_local().await?;
        if let Some(record) = &local {
            if record.packaging == Packaging::Bower {
                prompter.message(&format!(
                    "Ionic is managed by Bower ({}), running 'bower update {BOWER_PACKAGE}'",
                    record.source_path.display()
                ));
                self.package_manager.update(BOWER_PACKAGE, self.paths.project_root()).await?;
                return Ok(UpdateOutcome::Delegated);
            }
        }

        let lib_dir = self.paths.lib_dir();
        if !options.assume_yes {
            let question = format!(
                "Are you sure you want to replace {} with an updated version of Ionic?",
                lib_dir.display()
            );
            if !prompter.confirm(&question)? {
                info!("Update declined");
                return Err(IonicError::UserDeclined);
            }
        }

        let target = self.resolve_target(options.version.as_deref(), prompter).await?;

        if let Some(parent) = lib_dir.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| IonicError::file_system("create directory", parent, &e))?;
        }

        let mut backup = LibraryBackup::new(lib_dir.clone(), self.paths.backup_dir());
        backup.create_backup().await.map_err(|e| IonicError::FileSystemError {
            operation: "stage library directory".to_string(),
            path: lib_dir.display().to_string(),
            reason: format!("{e:#}"),
        })?;

        match self.install(&target, prompter).await {
            Ok(outcome) => {
                if let Err(e) = backup.cleanup_backup().await {
                    warn!("Failed to remove {}: {:#}", backup.backup_path().display(), e);
                }
                Ok(outcome)
            }
            Err(err) => match backup.restore_backup().await {
                Ok(()) => Err(err),
                Err(e) => {
                    warn!("Could not restore the previous library: {e:#}");
                    Err(restore_failed(&err, backup.backup_path(), &e))
                }
            },
        }
    }

    async fn resolve_target(
        &self,
        requested: Option<&str>,
        prompter: &dyn Prompter,
    ) -> Result<UpdateTarget, IonicError> {
        match requested {
            Some(version) => {
                let archive = RegistryClient::archive_path_for(version);
                Ok(UpdateTarget {
                    version: version.to_string(),
                    url: self.resolver.registry().archive_url(&archive),
                })
            }
            None => {
                let latest = self.resolver.fetch_remote_latest().await?;
                prompter.message(&format!(
                    "Latest version: {}  (released {})",
                    latest.version_number, latest.release_date
                ));
                Ok(UpdateTarget {
                    url: self.resolver.registry().archive_url(&latest.archive),
                    version: latest.version_number,
                })
            }
        }
    }

    async fn install(
        &self,
        target: &UpdateTarget,
        prompter: &dyn Prompter,
    ) -> Result<UpdateOutcome, IonicError> {
        let archive = TempArchive {
            path: self.paths.archive_path(),
        };

        prompter.message(&format!("Downloading: {}", target.url));
        let summary = self.download(target, archive.path()).await?;
        debug!("Downloaded {} bytes, sha256:{}", summary.bytes, summary.sha256);

        let files = extract_zip_async(archive.path(), &self.paths.lib_dir()).await?;
        debug!("Extracted {files} files into {}", self.paths.lib_dir().display());
        archive.remove();

        let record = match self.resolver.load_local().await {
            Ok(Some(record)) => record,
            Ok(None) => {
                return Ok(UpdateOutcome::InstalledUnverified {
                    reason: "the archive did not contain a version descriptor".to_string(),
                });
            }
            Err(e) => {
                return Ok(UpdateOutcome::InstalledUnverified {
                    reason: e.to_string(),
                });
            }
        };

        prompter.message(&format!("Ionic version updated to: {}", record.version));
        if let Err(e) = record_library_version(self.paths.project_root(), &record.version) {
            warn!("Failed to record ionic {} in bower.json: {:#}", record.version, e);
        }

        Ok(UpdateOutcome::Installed(record))
    }

    async fn download(
        &self,
        target: &UpdateTarget,
        dest: &Path,
    ) -> Result<DownloadSummary, IonicError> {
        let response = self.resolver.registry().fetch_archive(&target.url, &target.version).await?;
        let expected = response.content_length();

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| IonicError::file_system("create archive", dest, &e))?;

        let progress = ProgressBar::download(expected, self.show_progress);
        progress.set_prefix(format!("ionic-v{}.zip", target.version));

        let result = stream_to_file(response, &mut file, dest, &progress).await;
        progress.finish_and_clear();
        let summary = result?;

        file.sync_all().await.map_err(|e| IonicError::file_system("sync archive", dest, &e))?;

        if let Some(expected) = expected {
            if summary.bytes != expected {
                return Err(IonicError::IncompleteDownload {
                    received: summary.bytes,
                    expected,
                });
            }
        }

        Ok(summary)
    }
}

/// The update failed and its rollback did too, so the previous library is
/// only available at `backup_path`.
fn restore_failed(error: &IonicError, backup_path: &Path, restore: &anyhow::Error) -> IonicError {
    IonicError::FileSystemError {
        operation: "restore previous library".to_string(),
        path: backup_path.display().to_string(),
        reason: format!("{error}; the rollback also failed: {restore:#}"),
    }
}

/// Write the body chunk by chunk, advancing progress only after each write.
async fn stream_to_file(
    response: reqwest::Response,
    file: &mut tokio::fs::File,
    dest: &Path,
    progress: &ProgressBar,
) -> Result<DownloadSummary, IonicError> {
    let mut hasher = Sha256::new();
    let mut received: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| IonicError::network("downloading archive", &e))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| IonicError::file_system("write archive", dest, &e))?;
        hasher.update(&chunk);
        received += chunk.len() as u64;
        progress.inc(chunk.len() as u64);
    }

    file.flush().await.map_err(|e| IonicError::file_system("write archive", dest, &e))?;

    Ok(DownloadSummary {
        bytes: received,
        sha256: hex::encode(hasher.finalize()),
    })
}
