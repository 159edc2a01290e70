//! Ionic CLI - library version management and dashboard login
//!
//! Keeps the Ionic front-end library vendored under `www/lib/ionic` of a
//! hybrid app project in step with the releases published on the Ionic code
//! host, and obtains cookie-based sessions for the Ionic dashboard.
//!
//! # Architecture Overview
//!
//! Two workflows share a small amount of infrastructure:
//!
//! - **Library updates**: the installed version is read from
//!   `www/lib/ionic/version.json` (or `bower.json` for Bower installs),
//!   compared with the registry's `latest.json`, and replaced by streaming a
//!   release zip to disk, extracting it, and reading the new version back.
//!   The previous library is kept aside until the new one is in place.
//! - **Dashboard login**: credentials from flags, environment or a prompt
//!   drive a form login; prompted sessions are persisted and reused until
//!   their `sessionid` cookie expires.
//!
//! # Core Modules
//!
//! - [`library`] - version detection, registry client, archive updater
//! - [`auth`] - credential resolution, cookie sessions, login handshake
//! - [`store`] - JSON-file key/value persistence for sessions
//! - [`config`] - global configuration (`~/.ionic/config.toml`)
//! - [`core`] - error types and user-facing error presentation
//! - [`cli`] - command-line interface
//! - [`utils`] - HTTP client factory, prompts, progress bars, file helpers
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Compare the installed library with the latest release
//! ionic lib
//!
//! # Update to the latest release
//! ionic lib update
//!
//! # Log in to the dashboard
//! ionic login
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod library;
pub mod store;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
