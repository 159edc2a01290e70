//! Shared setup for CLI commands.

use super::CliConfig;
use crate::auth::SessionManager;
use crate::config::GlobalConfig;
use crate::constants::COOKIE_STORE;
use crate::library::{LibraryPaths, RegistryClient};
use crate::store::Store;
use crate::utils::progress::progress_enabled;
use crate::utils::{ClientOptions, RedirectMode, build_client};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolved configuration and locations shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: GlobalConfig,
    /// Directory holding `config.toml` and the persisted stores.
    pub state_dir: PathBuf,
    pub project_dir: PathBuf,
    pub show_progress: bool,
    proxy: Option<String>,
}

impl CommandContext {
    /// Load the global config and resolve paths for this invocation.
    ///
    /// Stores live next to the config file, so pointing `--config` or
    /// `IONIC_CONFIG_PATH` elsewhere also relocates persisted sessions.
    pub async fn from_cli_config(cli: &CliConfig) -> Result<Self> {
        let config_path = match &cli.config_path {
            Some(path) => path.clone(),
            None => GlobalConfig::default_path()?,
        };
        let config = GlobalConfig::load_with_optional(Some(config_path.clone())).await?;

        let state_dir = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let project_dir = match &cli.project_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to determine the working directory")?,
        };

        Ok(Self::new(config, state_dir, project_dir, progress_enabled(cli.no_progress)))
    }

    #[must_use]
    pub fn new(
        config: GlobalConfig,
        state_dir: PathBuf,
        project_dir: PathBuf,
        show_progress: bool,
    ) -> Self {
        let proxy = config.effective_proxy();
        debug!(
            "Registry {}, dashboard {}, proxy {}",
            config.registry_url,
            config.dashboard_url,
            proxy.as_deref().unwrap_or("none")
        );
        Self {
            config,
            state_dir,
            project_dir,
            show_progress,
            proxy,
        }
    }

    /// Replace the proxy resolved from config and environment.
    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    #[must_use]
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    #[must_use]
    pub fn library_paths(&self) -> LibraryPaths {
        LibraryPaths::new(&self.project_dir)
    }

    #[must_use]
    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    fn client(&self, redirects: RedirectMode) -> Result<reqwest::Client> {
        Ok(build_client(&ClientOptions {
            proxy: self.proxy.clone(),
            connect_timeout: self.config.connect_timeout(),
            redirects,
        })?)
    }

    /// Client for the library registry.
    pub fn registry(&self) -> Result<RegistryClient> {
        let client = self.client(RedirectMode::Follow)?;
        Ok(RegistryClient::new(self.config.registry_url.clone(), client))
    }

    /// Session manager for the configured dashboard, backed by the cookie store.
    pub async fn session_manager(&self) -> Result<SessionManager> {
        let client = self.client(RedirectMode::Manual)?;
        let store = Store::open(&self.state_dir, COOKIE_STORE).await?;
        Ok(SessionManager::new(&self.config.dashboard_url, client, store))
    }
}
