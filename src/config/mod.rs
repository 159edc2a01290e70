//! Configuration management for the Ionic CLI
//!
//! - `global` - user-wide settings (`~/.ionic/config.toml`): registry and
//!   dashboard URLs, proxy, network timeouts
//!
//! Project-level state is not configured here; a project is recognized by
//! its `www` directory and the library version comes from the files under
//! `www/lib/ionic`.

mod global;

pub use global::{GlobalConfig, NetworkConfig};
