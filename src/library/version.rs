//! Local and remote version records.
//!
//! The installed version is read from `www/lib/ionic/version.json`. Projects
//! that manage the library with Bower have no such file but ship a
//! `bower.json` next to the sources; its presence switches the update path to
//! the package manager.

use crate::constants::{
    ARCHIVE_FILE_NAME, BACKUP_SUFFIX, BOWER_DESCRIPTOR, LIBRARY_DIR, VERSION_DESCRIPTOR, WWW_DIR,
};
use crate::core::IonicError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How the library got into the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packaging {
    /// Unpacked from a registry archive; described by `version.json`.
    Direct,
    /// Installed by Bower; described by `bower.json`.
    Bower,
}

/// Version of the library installed in the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVersionRecord {
    pub version: String,
    pub packaging: Packaging,
    /// Descriptor the version was read from.
    pub source_path: PathBuf,
}

/// The registry's `latest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteVersionRecord {
    pub version_number: String,
    pub release_date: String,
    /// Archive location, usually a registry-relative path such as
    /// `/1.3.0/ionic-v1.3.0.zip`.
    pub archive: String,
}

/// Outcome of comparing the local and remote versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    UpToDate,
    Outdated,
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpToDate => write!(f, "up to date"),
            Self::Outdated => write!(f, "out of date"),
        }
    }
}

/// Exact string comparison; no semantic-version ordering is implied.
#[must_use]
pub fn compare(local: &str, remote: &str) -> VersionStatus {
    if local == remote {
        VersionStatus::UpToDate
    } else {
        VersionStatus::Outdated
    }
}

/// Filesystem layout of the library inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPaths {
    project_root: PathBuf,
}

impl LibraryPaths {
    #[must_use]
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    #[must_use]
    pub fn www_dir(&self) -> PathBuf {
        self.project_root.join(WWW_DIR)
    }

    /// `www/lib/ionic`
    #[must_use]
    pub fn lib_dir(&self) -> PathBuf {
        self.project_root.join(LIBRARY_DIR)
    }

    #[must_use]
    pub fn version_descriptor(&self) -> PathBuf {
        self.lib_dir().join(VERSION_DESCRIPTOR)
    }

    #[must_use]
    pub fn bower_descriptor(&self) -> PathBuf {
        self.lib_dir().join(BOWER_DESCRIPTOR)
    }

    /// Download target during an update.
    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.lib_dir().join(ARCHIVE_FILE_NAME)
    }

    /// Sibling holding the previous install while an update runs.
    #[must_use]
    pub fn backup_dir(&self) -> PathBuf {
        self.lib_dir().with_extension(BACKUP_SUFFIX)
    }

    /// Fails with [`IonicError::ProjectNotFound`] unless `www` exists.
    pub fn require_project(&self) -> Result<(), IonicError> {
        if self.www_dir().is_dir() {
            Ok(())
        } else {
            Err(IonicError::ProjectNotFound {
                path: self.project_root.display().to_string(),
            })
        }
    }
}

#[derive(Deserialize)]
struct Descriptor {
    version: String,
}

/// Read the installed version.
///
/// `version.json` is authoritative when present; `bower.json` is consulted
/// only when it is absent. `Ok(None)` means neither file exists.
pub async fn load_local(paths: &LibraryPaths) -> Result<Option<LocalVersionRecord>, IonicError> {
    let candidates = [
        (paths.version_descriptor(), Packaging::Direct),
        (paths.bower_descriptor(), Packaging::Bower),
    ];

    for (path, packaging) in candidates {
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(IonicError::VersionDescriptorUnreadable {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                });
            }
        };

        let descriptor: Descriptor = serde_json::from_str(&content).map_err(|e| {
            IonicError::VersionDescriptorUnreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        debug!("Local library version {} from {}", descriptor.version, path.display());
        return Ok(Some(LocalVersionRecord {
            version: descriptor.version,
            packaging,
            source_path: path,
        }));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project() -> (TempDir, LibraryPaths) {
        let temp = TempDir::new().unwrap();
        let paths = LibraryPaths::new(temp.path());
        std::fs::create_dir_all(paths.lib_dir()).unwrap();
        (temp, paths)
    }

    #[test]
    fn test_compare_is_string_equality() {
        assert_eq!(compare("1.3.0", "1.3.0"), VersionStatus::UpToDate);
        assert_eq!(compare("1.2.0", "1.3.0"), VersionStatus::Outdated);
        // No semantic ordering: a newer local copy is still "out of date"
        assert_eq!(compare("2.0.0", "1.3.0"), VersionStatus::Outdated);
        assert_eq!(compare("1.3", "1.3.0"), VersionStatus::Outdated);
    }

    #[test]
    fn test_paths_layout() {
        let paths = LibraryPaths::new("/proj");
        assert_eq!(paths.lib_dir(), PathBuf::from("/proj/www/lib/ionic"));
        assert_eq!(paths.archive_path(), PathBuf::from("/proj/www/lib/ionic/ionic.zip"));
        assert_eq!(paths.backup_dir(), PathBuf::from("/proj/www/lib/ionic.backup"));
    }

    #[test]
    fn test_require_project() {
        let temp = TempDir::new().unwrap();
        let paths = LibraryPaths::new(temp.path());
        assert!(matches!(paths.require_project(), Err(IonicError::ProjectNotFound { .. })));

        std::fs::create_dir(temp.path().join("www")).unwrap();
        assert!(paths.require_project().is_ok());
    }

    #[tokio::test]
    async fn test_primary_descriptor_wins() {
        let (_temp, paths) = project();
        std::fs::write(paths.version_descriptor(), r#"{"version":"1.2.0"}"#).unwrap();
        // An unparsable bower.json must never be read
        std::fs::write(paths.bower_descriptor(), "garbage").unwrap();

        let record = load_local(&paths).await.unwrap().unwrap();
        assert_eq!(record.version, "1.2.0");
        assert_eq!(record.packaging, Packaging::Direct);
        assert_eq!(record.source_path, paths.version_descriptor());
    }

    #[tokio::test]
    async fn test_bower_fallback() {
        let (_temp, paths) = project();
        std::fs::write(paths.bower_descriptor(), r#"{"name":"ionic","version":"1.1.1"}"#)
            .unwrap();

        let record = load_local(&paths).await.unwrap().unwrap();
        assert_eq!(record.version, "1.1.1");
        assert_eq!(record.packaging, Packaging::Bower);
    }

    #[tokio::test]
    async fn test_no_descriptor() {
        let (_temp, paths) = project();
        assert_eq!(load_local(&paths).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unparsable_descriptor() {
        let (_temp, paths) = project();
        std::fs::write(paths.version_descriptor(), "{ not json").unwrap();

        let err = load_local(&paths).await.unwrap_err();
        assert!(matches!(err, IonicError::VersionDescriptorUnreadable { .. }));
    }

    #[tokio::test]
    async fn test_descriptor_without_version() {
        let (_temp, paths) = project();
        std::fs::write(paths.version_descriptor(), r#"{"codename":"x"}"#).unwrap();

        assert!(load_local(&paths).await.is_err());
    }

    #[test]
    fn test_remote_record_parses() {
        let record: RemoteVersionRecord = serde_json::from_str(
            r#"{"version_number":"1.3.0","release_date":"2016-05-24","archive":"/1.3.0/ionic-v1.3.0.zip","codename":"delhi"}"#,
        )
        .unwrap();
        assert_eq!(record.version_number, "1.3.0");
        assert_eq!(record.archive, "/1.3.0/ionic-v1.3.0.zip");
    }
}
