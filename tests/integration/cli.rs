use predicates::prelude::*;

use crate::common::{TestEnvironment, run};
use ionic_cli::test_utils::ScriptedServer;

#[test]
fn test_help_lists_commands() {
    let mut cmd = assert_cmd::Command::cargo_bin("ionic").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("lib"))
        .stdout(predicate::str::contains("login"));
}

#[test]
fn test_version_flag() {
    let mut cmd = assert_cmd::Command::cargo_bin("ionic").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_lib_update_help_mentions_alias() {
    let mut cmd = assert_cmd::Command::cargo_bin("ionic").unwrap();
    cmd.args(["lib", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("up"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = assert_cmd::Command::cargo_bin("ionic").unwrap();
    cmd.arg("serve").assert().failure();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_config_is_reported() {
    let server = ScriptedServer::new(vec![]).await;
    let env = TestEnvironment::new(&server);
    std::fs::write(env.config_path(), "registry_url = \"ftp://example.com\"\n").unwrap();

    run(env.ionic_command(), &["lib"])
        .await
        .failure()
        .stderr(predicate::str::contains("registry_url must be an http:// or https:// URL"));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unparsable_config_is_reported() {
    let server = ScriptedServer::new(vec![]).await;
    let env = TestEnvironment::new(&server);
    std::fs::write(env.config_path(), "registry_url = [").unwrap();

    run(env.ionic_command(), &["lib"]).await.failure().stderr(predicate::str::contains("error"));
}
