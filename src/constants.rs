//! Global constants used throughout the Ionic CLI.
//!
//! Remote endpoints, environment variable names, on-disk layout and
//! network timeouts live here so the library and login workflows agree on
//! them without passing strings around.

use std::time::Duration;

/// Registry that serves `latest.json` and the versioned library archives.
pub const DEFAULT_REGISTRY_URL: &str = "http://code.ionicframework.com";

/// Dashboard used for account login.
pub const DEFAULT_DASHBOARD_URL: &str = "https://apps.ionicframework.com";

/// Path of the latest-release descriptor, relative to the registry.
pub const LATEST_METADATA_PATH: &str = "/latest.json";

/// Path of the login form, relative to the dashboard.
pub const LOGIN_PATH: &str = "/login";

/// Path of the account signup page, relative to the dashboard.
pub const SIGNUP_PATH: &str = "/signup";

/// Proxy applied to every outbound request when set.
pub const PROXY_ENV: &str = "PROXY";

/// Account email used when `--email` is not given.
pub const EMAIL_ENV: &str = "IONIC_EMAIL";

/// Account password used when `--password` is not given.
pub const PASSWORD_ENV: &str = "IONIC_PASSWORD";

/// Overrides the location of the global configuration file.
pub const CONFIG_PATH_ENV: &str = "IONIC_CONFIG_PATH";

/// Any value disables progress bars.
pub const NO_PROGRESS_ENV: &str = "IONIC_NO_PROGRESS";

/// Directory that marks a project root.
pub const WWW_DIR: &str = "www";

/// Library install location, relative to the project root.
pub const LIBRARY_DIR: &str = "www/lib/ionic";

/// Primary version descriptor inside the library directory.
pub const VERSION_DESCRIPTOR: &str = "version.json";

/// Descriptor written when the library is managed by Bower.
pub const BOWER_DESCRIPTOR: &str = "bower.json";

/// Name of the downloaded archive inside the library directory.
pub const ARCHIVE_FILE_NAME: &str = "ionic.zip";

/// Suffix of the sibling directory holding the previous install during an update.
pub const BACKUP_SUFFIX: &str = "backup";

/// Package name handed to `bower update`.
pub const BOWER_PACKAGE: &str = "ionic";

/// Cookie whose presence and expiry decide whether a session is usable.
pub const SESSION_COOKIE: &str = "sessionid";

/// Store namespace holding persisted dashboard sessions.
pub const COOKIE_STORE: &str = "cookies";

/// Directory under the home directory holding config and persisted state.
pub const STATE_DIR_NAME: &str = ".ionic";

/// Default connect timeout for registry and dashboard requests (30 seconds).
///
/// Only the connection phase is bounded; archive downloads may take as long
/// as the transfer needs.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
