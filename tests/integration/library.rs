use predicates::prelude::*;

use crate::common::{TestEnvironment, run, run_with_stdin};
use ionic_cli::test_utils::{ScriptedResponse, ScriptedServer, latest_json, library_archive};

fn latest(version: &str) -> ScriptedResponse {
    ScriptedResponse::json(200, &latest_json(version, "2026-09-01"))
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lib_reports_out_of_date() {
    let server = ScriptedServer::new(vec![latest("1.3.0")]).await;
    let env = TestEnvironment::new(&server);
    env.project.install_version("1.2.0");

    run(env.ionic_command(), &["lib"])
        .await
        .success()
        .stdout(predicate::str::contains("Local Ionic version: 1.2.0"))
        .stdout(predicate::str::contains("version.json"))
        .stdout(predicate::str::contains("Latest Ionic version: 1.3.0  (released 2026-09-01)"))
        .stdout(predicate::str::contains(" * Local version is out of date"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lib_reports_up_to_date_bower_install() {
    let server = ScriptedServer::new(vec![latest("1.3.0")]).await;
    let env = TestEnvironment::new(&server);
    env.project.install_bower_version("1.3.0");

    run(env.ionic_command(), &["lib"])
        .await
        .success()
        .stdout(predicate::str::contains("bower.json"))
        .stdout(predicate::str::contains(" * Local version up to date"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lib_without_local_library_still_shows_latest() {
    let server = ScriptedServer::new(vec![latest("1.3.0")]).await;
    let env = TestEnvironment::new(&server);

    run(env.ionic_command(), &["lib"])
        .await
        .success()
        .stdout(predicate::str::contains("Unable to load ionic lib version information"))
        .stdout(predicate::str::contains("Latest Ionic version: 1.3.0"))
        .stdout(predicate::str::contains("Local version").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lib_fails_when_registry_errors() {
    let server = ScriptedServer::new(vec![ScriptedResponse::new(500, "oops")]).await;
    let env = TestEnvironment::new(&server);
    env.project.install_version("1.2.0");

    run(env.ionic_command(), &["lib"])
        .await
        .failure()
        .stdout(predicate::str::contains("Local Ionic version: 1.2.0"))
        .stderr(predicate::str::contains("HTTP status 500"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lib_outside_project_fails() {
    let server = ScriptedServer::new(vec![]).await;
    let env = TestEnvironment::new(&server);
    std::fs::remove_dir_all(env.project.root().join("www")).unwrap();

    run(env.ionic_command(), &["lib"])
        .await
        .failure()
        .stderr(predicate::str::contains("no www directory found"));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_to_latest() {
    let server = ScriptedServer::new(vec![
        latest("1.3.0"),
        ScriptedResponse::new(200, library_archive("1.3.0")),
    ])
    .await;
    let env = TestEnvironment::new(&server);
    env.project.install_version("1.2.0");

    run(env.ionic_command(), &["lib", "update", "--yes"])
        .await
        .success()
        .stdout(predicate::str::contains("Latest version: 1.3.0  (released 2026-09-01)"))
        .stdout(predicate::str::contains("Downloading: "))
        .stdout(predicate::str::contains("/1.3.0/ionic-v1.3.0.zip"))
        .stdout(predicate::str::contains("Ionic version updated to: 1.3.0"));

    let paths = env.project.paths();
    let paths_requested: Vec<String> = server.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths_requested, vec!["/latest.json", "/1.3.0/ionic-v1.3.0.zip"]);
    assert!(paths.lib_dir().join("js/ionic.bundle.js").exists());
    assert!(!paths.lib_dir().join("old-marker.txt").exists());
    assert!(!paths.archive_path().exists());
    assert!(!paths.backup_dir().exists());

    let bower = std::fs::read_to_string(env.project.root().join("bower.json")).unwrap();
    assert!(bower.contains("driftyco/ionic-bower#1.3.0"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_confirmed_on_stdin() {
    let server = ScriptedServer::new(vec![ScriptedResponse::new(200, library_archive("1.2.5"))]).await;
    let env = TestEnvironment::new(&server);
    env.project.install_version("1.2.0");

    run_with_stdin(env.ionic_command(), &["lib", "up", "--version", "1.2.5"], "yes\n")
        .await
        .success()
        .stdout(predicate::str::contains("Are you sure you want to replace"))
        .stdout(predicate::str::contains("Ionic version updated to: 1.2.5"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_declined_changes_nothing() {
    let server = ScriptedServer::new(vec![]).await;
    let env = TestEnvironment::new(&server);
    env.project.install_version("1.2.0");

    run_with_stdin(env.ionic_command(), &["lib", "update"], "n\n")
        .await
        .success()
        .stdout(predicate::str::contains("Update cancelled"));

    assert_eq!(server.request_count(), 0);
    assert!(env.project.paths().lib_dir().join("old-marker.txt").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_to_unknown_version() {
    let server = ScriptedServer::new(vec![ScriptedResponse::new(404, "Not Found")]).await;
    let env = TestEnvironment::new(&server);
    env.project.install_version("1.2.0");

    run(env.ionic_command(), &["lib", "update", "--version", "9.9.9", "--yes"])
        .await
        .failure()
        .stderr(predicate::str::contains("Invalid version: 9.9.9"));

    let paths = env.project.paths();
    assert!(paths.lib_dir().join("old-marker.txt").exists());
    assert!(!paths.archive_path().exists());
    assert!(!paths.backup_dir().exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_server_failure_reports_status() {
    let server = ScriptedServer::new(vec![ScriptedResponse::new(503, "")]).await;
    let env = TestEnvironment::new(&server);
    env.project.install_version("1.2.0");

    run(env.ionic_command(), &["lib", "update", "--version", "1.3.0", "-y"])
        .await
        .failure()
        .stderr(predicate::str::contains("Unable to download zip (503)"));
    assert!(env.project.paths().lib_dir().join("old-marker.txt").exists());
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_bower_install_delegates_without_prompt() {
    let server = ScriptedServer::new(vec![]).await;
    let env = TestEnvironment::new(&server);
    env.project.install_bower_version("1.2.0");

    // An empty PATH means bower cannot be found.
    let mut cmd = env.ionic_command();
    cmd.env("PATH", "");
    run(cmd, &["lib", "update"])
        .await
        .failure()
        .stderr(predicate::str::contains("bower is not installed"));
    assert_eq!(server.request_count(), 0);
}
