//! Project `bower.json` bookkeeping.
//!
//! After an archive install the project's `bower.json` is pointed at the
//! matching `ionic-bower` release so a later `bower install` reproduces the
//! same library version.

use crate::utils::fs::atomic_write;
use anyhow::{Context, Result};
use serde_json::{Map, Value, json};
use std::path::Path;
use tracing::debug;

/// Bower endpoint that publishes library releases.
pub const IONIC_BOWER_REPO: &str = "driftyco/ionic-bower";

/// Set `devDependencies.ionic` in `<project_root>/bower.json` to `version`.
///
/// A missing manifest is created with a minimal private package stanza.
pub fn record_library_version(project_root: &Path, version: &str) -> Result<()> {
    let path = project_root.join("bower.json");

    let mut manifest = if path.exists() {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str::<Value>(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?
    } else {
        json!({ "name": "HelloIonic", "private": "true" })
    };

    let root = manifest
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("{} is not a JSON object", path.display()))?;
    let dev_dependencies = root
        .entry("devDependencies")
        .or_insert_with(|| Value::Object(Map::new()));
    let dev_dependencies = dev_dependencies
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("devDependencies in {} is not an object", path.display()))?;
    dev_dependencies
        .insert("ionic".to_string(), Value::String(format!("{IONIC_BOWER_REPO}#{version}")));

    let mut content = serde_json::to_string_pretty(&manifest)?;
    content.push('\n');
    atomic_write(&path, content.as_bytes(), false)?;

    debug!("Recorded ionic {version} in {}", path.display());
    Ok(())
}
