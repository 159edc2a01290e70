//! Local-versus-latest version checks.

use crate::core::IonicError;
use crate::library::registry::RegistryClient;
use crate::library::version::{
    LibraryPaths, LocalVersionRecord, RemoteVersionRecord, VersionStatus, compare, load_local,
};

/// Both sides of a version check. Either side may have failed independently.
#[derive(Debug)]
pub struct VersionReport {
    pub local: Result<Option<LocalVersionRecord>, IonicError>,
    pub remote: Result<RemoteVersionRecord, IonicError>,
}

impl VersionReport {
    /// Comparison result, when both versions are known.
    #[must_use]
    pub fn status(&self) -> Option<VersionStatus> {
        match (&self.local, &self.remote) {
            (Ok(Some(local)), Ok(remote)) => Some(compare(&local.version, &remote.version_number)),
            _ => None,
        }
    }
}

/// Reads the installed version and asks the registry for the latest one.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    paths: LibraryPaths,
    registry: RegistryClient,
}

impl VersionResolver {
    #[must_use]
    pub const fn new(paths: LibraryPaths, registry: RegistryClient) -> Self {
        Self {
            paths,
            registry,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &RegistryClient {
        &self.registry
    }

    pub async fn load_local(&self) -> Result<Option<LocalVersionRecord>, IonicError> {
        load_local(&self.paths).await
    }

    pub async fn fetch_remote_latest(&self) -> Result<RemoteVersionRecord, IonicError> {
        self.registry.fetch_latest().await
    }

    /// Check both sides; failures are captured in the report, not returned.
    pub async fn report(&self) -> VersionReport {
        VersionReport {
            local: self.load_local().await,
            remote: self.fetch_remote_latest().await,
        }
    }
}
