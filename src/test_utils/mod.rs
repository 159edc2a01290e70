//! Test utilities for the Ionic CLI
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suite.
//!
//! - [`server`] - a scripted local HTTP server standing in for the registry
//!   and dashboard
//! - [`fixtures`] - temporary projects, zip archives and a scripted prompter
//!
//! # Example
//!
//! ```rust,no_run
//! use ionic_cli::test_utils::{IonicProject, ScriptedResponse, ScriptedServer, library_archive};
//!
//! # async fn example() {
//! let server = ScriptedServer::new(vec![ScriptedResponse::new(200, library_archive("1.3.0"))]).await;
//! let project = IonicProject::new();
//! project.install_version("1.2.0");
//! # }
//! ```

pub mod fixtures;
pub mod server;

pub use fixtures::{
    IonicProject, ScriptedPrompter, latest_json, library_archive, zip_archive,
};
pub use server::{RecordedRequest, ScriptedResponse, ScriptedServer};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Install a test-friendly tracing subscriber once per process.
///
/// With no explicit level, logging is enabled only when `RUST_LOG` is set.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
