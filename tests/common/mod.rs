//! Shared helpers for the integration suite.

#![allow(dead_code)]

use assert_cmd::Command;
use ionic_cli::test_utils::{IonicProject, ScriptedServer};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated project plus state directory wired to a scripted server.
///
/// The `ionic` binary runs inside the project with its config, and therefore
/// its cookie store, under a private temporary directory.
pub struct TestEnvironment {
    pub project: IonicProject,
    state: TempDir,
}

impl TestEnvironment {
    /// Environment whose registry and dashboard both point at `server`.
    pub fn new(server: &ScriptedServer) -> Self {
        Self::with_urls(server.base_url(), server.base_url())
    }

    pub fn with_urls(registry_url: &str, dashboard_url: &str) -> Self {
        let state = TempDir::new().expect("create state dir");
        std::fs::write(
            state.path().join("config.toml"),
            format!(
                "registry_url = \"{registry_url}\"\ndashboard_url = \"{dashboard_url}\"\n\n[network]\nconnect_timeout_secs = 5\n"
            ),
        )
        .expect("write config");

        Self {
            project: IonicProject::new(),
            state,
        }
    }

    pub fn state_dir(&self) -> &Path {
        self.state.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.state.path().join("config.toml")
    }

    pub fn cookies_path(&self) -> PathBuf {
        self.state.path().join("cookies.json")
    }

    /// `ionic` command with a clean, deterministic environment.
    pub fn ionic_command(&self) -> Command {
        let mut cmd = Command::cargo_bin("ionic").expect("ionic binary");
        cmd.current_dir(self.project.root())
            .env("IONIC_CONFIG_PATH", self.config_path())
            .env("IONIC_NO_PROGRESS", "1")
            .env("NO_COLOR", "1")
            .env_remove("PROXY")
            .env_remove("IONIC_EMAIL")
            .env_remove("IONIC_PASSWORD")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Run `cmd` with `args` off the async runtime so the scripted server keeps serving.
pub async fn run(cmd: Command, args: &[&str]) -> assert_cmd::assert::Assert {
    run_with_stdin(cmd, args, "").await
}

/// Like [`run`], feeding `stdin` to the process.
pub async fn run_with_stdin(
    mut cmd: Command,
    args: &[&str],
    stdin: &str,
) -> assert_cmd::assert::Assert {
    let args: Vec<String> = args.iter().map(|arg| (*arg).to_string()).collect();
    let stdin = stdin.to_string();
    tokio::task::spawn_blocking(move || cmd.args(&args).write_stdin(stdin).assert())
        .await
        .expect("command task")
}
