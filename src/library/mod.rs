//! Version checks and updates for the vendored Ionic library.
//!
//! A project keeps the library under `www/lib/ionic`. This module reads the
//! installed version, asks the registry for the latest release and replaces
//! the directory with a downloaded archive.
//!
//! # Module Structure
//!
//! - [`version`] - local/remote version records and project layout
//! - [`registry`] - HTTP client for `latest.json` and archives
//! - [`resolver`] - side-by-side local and latest version report
//! - [`updater`] - the download, extract and verify workflow
//! - [`backup`] - move-aside backup used for rollback
//! - [`package_manager`] - `bower update` delegation
//! - [`bower`] - project `bower.json` bookkeeping after an install
//!
//! # Examples
//!
//! ```rust,no_run
//! use ionic_cli::library::{LibraryPaths, RegistryClient, VersionResolver};
//!
//! # async fn example() {
//! let registry = RegistryClient::new("http://code.ionicframework.com", reqwest::Client::new());
//! let resolver = VersionResolver::new(LibraryPaths::new("."), registry);
//! let report = resolver.report().await;
//! println!("{:?}", report.status());
//! # }
//! ```

pub mod backup;
pub mod bower;
pub mod package_manager;
pub mod registry;
pub mod resolver;
pub mod updater;
pub mod version;


pub use package_manager::PackageManager;
pub use registry::RegistryClient;
pub use resolver::{VersionReport, VersionResolver};
pub use updater::{LibraryUpdater, UpdateOptions, UpdateOutcome};
pub use version::{
    LibraryPaths, LocalVersionRecord, Packaging, RemoteVersionRecord, VersionStatus, compare,
    load_local,
};
