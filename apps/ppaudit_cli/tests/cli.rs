// tests/cli.rs
use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/tenant-1/oauth2/v2.0/token";

/// Binary with a scrubbed environment: no .env, no config files, and both
/// endpoint families pointed at the mock server.
fn ppaudit(server: &MockServer, home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ppaudit").unwrap();
    cmd.env_clear()
        .current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("PPAUDIT__AUTH__AUTHORITY_HOST", server.uri())
        .env("PPAUDIT__API__BASE_URL", format!("{}/", server.uri()))
        .env("TENANT_ID", "tenant-1")
        .env("CLIENT_ID", "client-1")
        .env("CLIENT_SECRET", "secret-1");
    cmd
}

async fn mount_token(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "expires_in": 3599,
            "access_token": "tok"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_get(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("api-version", "2020-10-12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_client_secret_exits_before_any_request() {
    let server = MockServer::start().await;
    mount_token(&server, 0).await;
    let home = TempDir::new().unwrap();

    ppaudit(&server, &home)
        .env_remove("CLIENT_SECRET")
        .arg("find public apps")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("CLIENT_SECRET"));
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_token_request_exits_with_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "invalid_client" })))
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    ppaudit(&server, &home)
        .arg("test connection")
        .assert()
        .failure()
        .code(1)
        .stdout(contains("Attempting to get environments").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn unrecognized_query_is_not_an_error() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    let home = TempDir::new().unwrap();

    ppaudit(&server, &home)
        .arg("foobar")
        .assert()
        .success()
        .stdout(contains("Sorry, I don't understand the query: 'foobar'."))
        .stdout(contains("Try 'find public apps' or 'test connection'."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connection_reports_environment_count() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_get(
        &server,
        "/environments",
        json!({ "value": [
            { "name": "env-1", "properties": { "displayName": "Production" } },
            { "name": "env-2", "properties": { "displayName": "Staging" } },
            { "name": "env-3" }
        ]}),
    )
    .await;
    let home = TempDir::new().unwrap();

    ppaudit(&server, &home)
        .arg("Test Connection")
        .assert()
        .success()
        .stdout(contains("Successfully connected and found 3 environments."))
        .stdout(contains("Sample environment: Production"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connection_failure_exits_with_failure() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/environments"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    ppaudit(&server, &home)
        .arg("test connection")
        .assert()
        .failure()
        .code(1)
        .stdout(contains("Failed to list environments"));
}

#[tokio::test(flavor = "multi_thread")]
async fn public_apps_audit_reports_single_finding() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    mount_get(
        &server,
        "/environments",
        json!({ "value": [{ "name": "env-a", "properties": { "displayName": "Env-A" } }] }),
    )
    .await;
    mount_get(
        &server,
        "/environments/env-a/apps",
        json!({ "value": [
            { "name": "app-1", "properties": { "displayName": "App-1", "owner": "Jane Doe" } },
            { "name": "app-2", "properties": { "displayName": "App-2" } }
        ]}),
    )
    .await;
    mount_get(
        &server,
        "/environments/env-a/apps/app-1/permissions",
        json!({ "value": [
            { "properties": { "principal": { "type": "User", "displayName": "John Doe" } } },
            { "properties": { "principal": { "type": "Public", "displayName": "Group X" } } }
        ]}),
    )
    .await;
    mount_get(
        &server,
        "/environments/env-a/apps/app-2/permissions",
        json!({ "value": [
            { "properties": { "principal": { "type": "User", "displayName": "John Doe" } } }
        ]}),
    )
    .await;
    let home = TempDir::new().unwrap();

    ppaudit(&server, &home)
        .arg("find public apps")
        .assert()
        .success()
        .stdout(contains("--- Publicly Shared Power Apps Findings ---"))
        .stdout(contains("  - App: App-1 (ID: app-1)"))
        .stdout(contains("    Environment: Env-A (ID: env-a)"))
        .stdout(contains("    Owner: Jane Doe"))
        .stdout(contains("    Principal: Group X"))
        .stdout(contains("App-2").not())
        .stdout(contains("Total publicly shared apps found: 1"))
        .stderr(contains("dispatching query").and(contains("public apps audit")));
}

#[tokio::test(flavor = "multi_thread")]
async fn public_apps_audit_failure_reports_no_findings() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/environments"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    ppaudit(&server, &home)
        .arg("apps shared with everyone")
        .assert()
        .success()
        .stdout(contains("No publicly shared Power Apps were found."));
}
