//! Global configuration management for the Ionic CLI.
//!
//! The global configuration file holds user-wide settings: which registry
//! serves library archives, which dashboard handles login, an optional proxy
//! and network timeouts. Every field has a default, so the file is optional.
//!
//! # Location
//!
//! - **Unix/macOS**: `~/.ionic/config.toml`
//! - **Windows**: `%LOCALAPPDATA%\ionic\config.toml`
//!
//! The location can be overridden using the `IONIC_CONFIG_PATH` environment
//! variable or the `--config` flag. Persisted state (the session store) lives
//! next to the configuration file.
//!
//! # File Format
//!
//! ```toml
//! registry_url = "http://code.ionicframework.com"
//! dashboard_url = "https://apps.ionicframework.com"
//! proxy = "http://proxy.internal:3128"
//!
//! [network]
//! connect_timeout_secs = 30
//! ```
//!
//! # Proxy Resolution
//!
//! The `PROXY` environment variable wins over the `proxy` key, so existing
//! shell setups keep working without editing the file.

use crate::constants::{
    CONFIG_PATH_ENV, DEFAULT_CONNECT_TIMEOUT, DEFAULT_DASHBOARD_URL, DEFAULT_REGISTRY_URL,
    PROXY_ENV, STATE_DIR_NAME,
};
use crate::core::IonicError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

fn default_dashboard_url() -> String {
    DEFAULT_DASHBOARD_URL.to_string()
}

const fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT.as_secs()
}

/// Global configuration structure for the Ionic CLI.
///
/// # Examples
///
/// ```rust,no_run
/// use ionic_cli::config::GlobalConfig;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = GlobalConfig::load().await?;
/// println!("Registry: {}", config.registry_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Base URL serving `latest.json` and versioned archives.
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Base URL of the account dashboard.
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,

    /// Proxy for all outbound requests. Overridden by `PROXY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    /// Network tuning.
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Network settings shared by the registry and dashboard clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Seconds allowed for establishing a connection.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            registry_url: default_registry_url(),
            dashboard_url: default_dashboard_url(),
            proxy: None,
            network: NetworkConfig::default(),
        }
    }
}

impl GlobalConfig {
    /// Load global configuration from the default location.
    ///
    /// A missing file yields [`GlobalConfig::default`].
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` when given, otherwise from [`GlobalConfig::default_path`].
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate the configuration at `path`.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read global config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse global config from {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to `path`, creating parent directories.
    ///
    /// On Unix the file is restricted to the owner, since it may hold a proxy
    /// URL with embedded credentials.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize global config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write global config to {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(path)
                .await
                .with_context(|| format!("Failed to read permissions for {}", path.display()))?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).await.with_context(|| {
                format!("Failed to set secure permissions on {}", path.display())
            })?;
        }

        Ok(())
    }

    /// Path of the configuration file.
    ///
    /// `IONIC_CONFIG_PATH` wins; otherwise `config.toml` inside
    /// [`GlobalConfig::default_state_dir`].
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        Ok(Self::default_state_dir()?.join("config.toml"))
    }

    /// Per-user directory for configuration and persisted state.
    pub fn default_state_dir() -> Result<PathBuf> {
        let dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("ionic")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(STATE_DIR_NAME)
        };
        Ok(dir)
    }

    /// Reject URLs the HTTP layer could never use.
    pub fn validate(&self) -> Result<(), IonicError> {
        for (key, value) in [("registry_url", &self.registry_url), ("dashboard_url", &self.dashboard_url)]
        {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(IonicError::ConfigError {
                    message: format!("{key} must be an http:// or https:// URL, got '{value}'"),
                });
            }
        }
        if self.network.connect_timeout_secs == 0 {
            return Err(IonicError::ConfigError {
                message: "network.connect_timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Proxy to use, honoring the `PROXY` environment variable.
    #[must_use]
    pub fn effective_proxy(&self) -> Option<String> {
        self.proxy_with_override(std::env::var(PROXY_ENV).ok())
    }

    /// Proxy resolution with an explicit override value; empty strings count as unset.
    #[must_use]
    pub fn proxy_with_override(&self, override_value: Option<String>) -> Option<String> {
        override_value
            .filter(|value| !value.trim().is_empty())
            .or_else(|| self.proxy.clone().filter(|value| !value.trim().is_empty()))
    }

    /// Connect timeout as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.network.connect_timeout_secs)
    }
}
