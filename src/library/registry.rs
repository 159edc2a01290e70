//! Client for the library registry.
//!
//! The registry serves a `latest.json` release descriptor and one zip
//! archive per version at `/<version>/ionic-v<version>.zip`.

use crate::constants::LATEST_METADATA_PATH;
use crate::core::IonicError;
use crate::library::version::RemoteVersionRecord;
use reqwest::StatusCode;
use tracing::debug;

/// Registry endpoint bound to an HTTP client.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: String,
    client: reqwest::Client,
}

impl RegistryClient {
    /// `base_url` without a trailing slash, e.g. `http://code.ionicframework.com`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn latest_url(&self) -> String {
        format!("{}{}", self.base_url, LATEST_METADATA_PATH)
    }

    /// Registry-relative archive path for an explicit version.
    #[must_use]
    pub fn archive_path_for(version: &str) -> String {
        format!("/{version}/ionic-v{version}.zip")
    }

    /// Absolute URL for an archive path; absolute URLs pass through.
    #[must_use]
    pub fn archive_url(&self, archive: &str) -> String {
        if archive.starts_with("http://") || archive.starts_with("https://") {
            archive.to_string()
        } else if archive.starts_with('/') {
            format!("{}{}", self.base_url, archive)
        } else {
            format!("{}/{}", self.base_url, archive)
        }
    }

    /// Fetch and parse `latest.json`.
    pub async fn fetch_latest(&self) -> Result<RemoteVersionRecord, IonicError> {
        let url = self.latest_url();
        debug!("Fetching latest version metadata from {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| IonicError::network("loading latest version information", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IonicError::RemoteStatus {
                operation: "Loading latest version information".to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| IonicError::network("loading latest version information", &e))?;

        serde_json::from_str(&body).map_err(|e| IonicError::InvalidMetadata {
            url,
            reason: e.to_string(),
        })
    }

    /// Start downloading an archive and classify the response status.
    ///
    /// 404 means the version does not exist; any other 4xx/5xx is a generic
    /// download failure. The returned response has a success status and its
    /// body has not been read yet.
    pub async fn fetch_archive(
        &self,
        url: &str,
        version: &str,
    ) -> Result<reqwest::Response, IonicError> {
        debug!("Downloading archive {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| IonicError::network("downloading archive", &e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(IonicError::VersionNotFound {
                version: version.to_string(),
            }),
            status if status.is_client_error() || status.is_server_error() => {
                Err(IonicError::DownloadFailed {
                    status: status.as_u16(),
                })
            }
            _ => Ok(response),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> RegistryClient {
        RegistryClient::new("http://code.ionicframework.com/", reqwest::Client::new())
    }

    #[test]
    fn test_archive_path_for() {
        assert_eq!(RegistryClient::archive_path_for("1.3.0"), "/1.3.0/ionic-v1.3.0.zip");
    }

    #[test]
    fn test_urls() {
        let registry = registry();
        assert_eq!(registry.base_url(), "http://code.ionicframework.com");
        assert_eq!(registry.latest_url(), "http://code.ionicframework.com/latest.json");
        assert_eq!(
            registry.archive_url("/1.3.0/ionic-v1.3.0.zip"),
            "http://code.ionicframework.com/1.3.0/ionic-v1.3.0.zip"
        );
        assert_eq!(
            registry.archive_url("1.3.0/ionic-v1.3.0.zip"),
            "http://code.ionicframework.com/1.3.0/ionic-v1.3.0.zip"
        );
        assert_eq!(
            registry.archive_url("https://cdn.example.com/ionic.zip"),
            "https://cdn.example.com/ionic.zip"
        );
    }
}
