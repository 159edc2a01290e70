//! HTTP client factory shared by the registry and dashboard clients.

use crate::core::IonicError;
use std::time::Duration;
use tracing::debug;

/// Redirect handling for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// Follow up to ten redirects (registry downloads).
    Follow,
    /// Surface 3xx responses to the caller (login, where 302 means success).
    Manual,
}

/// Settings for [`build_client`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Proxy URL applied to every request.
    pub proxy: Option<String>,
    /// Bound on establishing a connection.
    pub connect_timeout: Duration,
    /// Redirect behavior.
    pub redirects: RedirectMode,
}

/// Build a [`reqwest::Client`] with the CLI user agent.
///
/// Only an explicitly configured proxy is used; system proxy variables are
/// ignored so `PROXY` stays the single switch.
pub fn build_client(options: &ClientOptions) -> Result<reqwest::Client, IonicError> {
    let redirect = match options.redirects {
        RedirectMode::Follow => reqwest::redirect::Policy::limited(10),
        RedirectMode::Manual => reqwest::redirect::Policy::none(),
    };

    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("ionic-cli/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(options.connect_timeout)
        .redirect(redirect);

    builder = match &options.proxy {
        Some(url) => {
            debug!("Routing requests through proxy {url}");
            let proxy = reqwest::Proxy::all(url).map_err(|e| IonicError::ConfigError {
                message: format!("Invalid proxy URL '{url}': {e}"),
            })?;
            builder.proxy(proxy)
        }
        None => builder.no_proxy(),
    };

    builder.build().map_err(|e| IonicError::ConfigError {
        message: format!("Failed to create HTTP client: {e}"),
    })
}
