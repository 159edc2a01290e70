use predicates::prelude::*;

use crate::common::{TestEnvironment, run, run_with_stdin};
use ionic_cli::test_utils::{ScriptedResponse, ScriptedServer};

fn login_page() -> ScriptedResponse {
    ScriptedResponse::new(200, "<form></form>")
        .with_header("Set-Cookie", "csrftoken=csrf-abc; Path=/")
}

fn login_accepted() -> ScriptedResponse {
    ScriptedResponse::new(302, "")
        .with_header("Location", "/")
        .with_header("Set-Cookie", "sessionid=session-xyz; Max-Age=1209600; Path=/")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_with_environment_credentials() {
    let server = ScriptedServer::new(vec![login_page(), login_accepted()]).await;
    let env = TestEnvironment::new(&server);

    let mut cmd = env.ionic_command();
    cmd.env("IONIC_EMAIL", "Dev@Example.com").env("IONIC_PASSWORD", "secret");
    run(cmd, &["login"]).await.success().stdout(predicate::str::contains("Logged in! :)"));

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].form_value("username").as_deref(), Some("dev@example.com"));
    assert_eq!(requests[1].form_value("csrfmiddlewaretoken").as_deref(), Some("csrf-abc"));
    assert!(!env.cookies_path().exists(), "flag credentials must not be persisted");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_with_only_email_flag() {
    let server = ScriptedServer::new(vec![]).await;
    let env = TestEnvironment::new(&server);

    run(env.ionic_command(), &["login", "-e", "dev@example.com"])
        .await
        .failure()
        .stderr(predicate::str::contains(
            "--password or -p command line flag, or IONIC_PASSWORD environment variable required",
        ));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_prompted_login_is_reused() {
    let server = ScriptedServer::new(vec![login_page(), login_accepted()]).await;
    let env = TestEnvironment::new(&server);

    run_with_stdin(env.ionic_command(), &["login"], "dev@example.com\nsecret\n")
        .await
        .success()
        .stdout(predicate::str::contains("To continue, please login to your Ionic account."))
        .stdout(predicate::str::contains("/signup"))
        .stdout(predicate::str::contains("Logged in! :)"));

    let stored = std::fs::read_to_string(env.cookies_path()).unwrap();
    assert!(stored.contains("session-xyz"));

    run(env.ionic_command(), &["login"])
        .await
        .success()
        .stdout(predicate::str::contains("Already logged in"));
    assert_eq!(server.request_count(), 2, "stored session must be reused without requests");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_rejected_credentials() {
    let server =
        ScriptedServer::new(vec![login_page(), ScriptedResponse::new(200, "<form></form>")]).await;
    let env = TestEnvironment::new(&server);

    run(env.ionic_command(), &["login", "--email", "dev@example.com", "--password", "wrong"])
        .await
        .failure()
        .stderr(predicate::str::contains("Email or Password incorrect"))
        .stdout(predicate::str::contains("Logged in").not());
    assert!(!env.cookies_path().exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_closed_stdin_aborts() {
    let server = ScriptedServer::new(vec![]).await;
    let env = TestEnvironment::new(&server);

    run_with_stdin(env.ionic_command(), &["login"], "")
        .await
        .failure()
        .stderr(predicate::str::contains("Failed to read input"));
    assert_eq!(server.request_count(), 0);
}
