//! Integration tests for the `cvaas` CLI binary.
//!
//! Argument handling and exit codes run without any service; the end-to-end
//! cases point the binary at a wiremock gateway through an `http://`
//! endpoint file.
#![allow(clippy::unwrap_used)]

use std::path::Path;
use std::process::Output;

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `cvaas` binary with env isolation.
///
/// Clears all `CVAAS_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn cvaas_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("cvaas");
    cmd.env("HOME", "/tmp/cvaas-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/cvaas-cli-test-nonexistent")
        .env("XDG_DATA_HOME", "/tmp/cvaas-cli-test-nonexistent")
        .env_remove("CVAAS_TOKEN_FILE")
        .env_remove("CVAAS_URL_FILE")
        .env_remove("CVAAS_TIMEOUT")
        .env_remove("CVAAS_OUTPUT")
        .env_remove("CVAAS_LEDGER")
        .env_remove("CVAAS_CA_CERT")
        .env_remove("RUST_LOG");
    cmd
}

/// Credential files plus a private ledger location.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(endpoint: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("token"), "s3cr3t\n").unwrap();
        std::fs::write(dir.path().join("url"), format!("{endpoint}\n")).unwrap();
        Self { dir }
    }

    fn ledger(&self) -> std::path::PathBuf {
        self.dir.path().join("workspaces.yaml")
    }

    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cvaas_cmd();
        cmd.arg("--token")
            .arg(self.dir.path().join("token"))
            .arg("--url")
            .arg(self.dir.path().join("url"))
            .arg("--ledger")
            .arg(self.ledger());
        cmd
    }
}

/// Run the binary off the runtime threads so the mock server keeps serving.
async fn run(mut cmd: assert_cmd::Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

fn ndjson(frames: &[serde_json::Value]) -> String {
    frames.iter().map(|f| format!("{f}\n")).collect()
}

fn closed_port_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    format!("http://{}", listener.local_addr().unwrap())
}

fn ledger_ids(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = cvaas_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    cvaas_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("CloudVision")
            .and(predicate::str::contains("get"))
            .and(predicate::str::contains("create"))
            .and(predicate::str::contains("assign"))
            .and(predicate::str::contains("run")),
    );
}

#[test]
fn test_completions_bash() {
    cvaas_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Validation happens before any network use ───────────────────────

#[test]
fn test_missing_token_flag_is_usage_error() {
    cvaas_cmd()
        .args(["get", "devices"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--token"));
}

#[test]
fn test_unreadable_token_file_is_credential_error() {
    let fixture = Fixture::new("http://127.0.0.1:9");
    std::fs::remove_file(fixture.dir.path().join("token")).unwrap();

    fixture
        .cmd()
        .args(["get", "devices"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Cannot load credentials"));
}

#[test]
fn test_mlag_and_danz_together_are_rejected() {
    // No credentials at all: the filter check must fire first.
    cvaas_cmd()
        .args(["get", "devices", "--mlag", "--danz"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--danz"));
}

#[test]
fn test_unknown_workspace_state_is_rejected() {
    cvaas_cmd()
        .args(["get", "workspaces", "--state", "FOO"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("FOO"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    cvaas_cmd()
        .args(["--timeout", "0", "ledger", "list"])
        .assert()
        .code(2);
}

// ── End to end against a mock gateway ───────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_get_devices_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/resources/inventory/v1/Device/all"))
        .and(header("authorization", "Bearer s3cr3t"))
        .and(body_json(json!({
            "partialEqFilter": [{
                "modelName": "cEOSLab",
                "extendedAttributes": {"featureEnabled": {"danz": true}}
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(ndjson(&[json!({
            "result": {"value": {
                "key": {"deviceId": "SN-1"},
                "hostname": "leaf1",
                "modelName": "cEOSLab",
                "softwareVersion": "4.30.1F",
                "systemMacAddress": "00:1c:73:00:00:01",
                "streamingStatus": "STREAMING_STATUS_ACTIVE",
                "extendedAttributes": {"featureEnabled": {"Danz": true}}
            }, "type": "INITIAL"}
        })])))
        .expect(1)
        .mount(&server)
        .await;

    let fixture = Fixture::new(&server.uri());
    let mut cmd = fixture.cmd();
    cmd.args(["get", "devices", "--model", "cEOSLab", "--danz", "-o", "json"]);
    let output = run(cmd).await;

    output.clone().assert().success();
    let devices: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(devices[0]["device_id"], "SN-1");
    assert_eq!(devices[0]["streaming_status"], "STREAMING_STATUS_ACTIVE");
    assert_eq!(devices[0]["danz_enabled"], true);
    assert_eq!(devices[0]["mlag_enabled"], false);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_get_workspaces_plain_prints_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/resources/workspace/v1/Workspace/all"))
        .and(body_json(json!({"partialEqFilter": [{"state": 1}]})))
        .respond_with(ResponseTemplate::new(200).set_body_string(ndjson(&[
            json!({"result": {"value": {"key": {"workspaceId": "ws-a"}, "state": "WORKSPACE_STATE_PENDING"}}}),
            json!({"result": {"value": {"key": {"workspaceId": "ws-b"}, "state": 1}}}),
        ])))
        .mount(&server)
        .await;

    let fixture = Fixture::new(&server.uri());
    let mut cmd = fixture.cmd();
    cmd.args(["get", "workspaces", "--state", "pending", "-o", "plain"]);
    run(cmd).await.assert().success().stdout("ws-a\nws-b\n");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_create_workspace_records_ledger() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/resources/workspace/v1/WorkspaceConfig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": {"key": {"workspaceId": "ws-new"}},
            "time": "2026-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fixture = Fixture::new(&server.uri());
    let mut cmd = fixture.cmd();
    cmd.args(["create", "workspace", "--id", "ws-new", "--name", "Demo", "-o", "json"]);
    run(cmd).await.assert().success();

    let recorded = ledger_ids(&fixture.ledger());
    assert!(recorded.contains("workspace_id: ws-new"));
    assert!(recorded.contains("workspace_name: Demo"));

    fixture
        .cmd()
        .args(["ledger", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("ws-new\n");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unauthenticated_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let fixture = Fixture::new(&server.uri());
    let mut cmd = fixture.cmd();
    cmd.args(["get", "devices"]);
    run(cmd).await.assert().code(3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_rejected_assignment_exits_with_rejection_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/resources/tag/v2/TagAssignmentConfig"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 3,
            "message": "unknown device"
        })))
        .mount(&server)
        .await;

    let fixture = Fixture::new(&server.uri());
    let mut cmd = fixture.cmd();
    cmd.args([
        "assign", "tag", "--workspace", "ws-1", "--device", "SN-9", "--label", "site",
        "--value", "lab",
    ]);
    run(cmd).await.assert().code(5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_run_process_reports_every_acknowledgement() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/resources/workspace/v1/WorkspaceConfig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": {"key": {"workspaceId": "ws-run"}},
            "time": "2026-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/resources/tag/v2/TagConfig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": {"key": {"label": "site", "value": "lab"}},
            "time": "2026-01-01T00:00:01Z"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/resources/inventory/v1/Device/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ndjson(&[
            json!({"result": {"value": {"key": {"deviceId": "SN-1"}, "modelName": "cEOSLab"}}}),
            json!({"result": {"value": {"key": {"deviceId": "SN-2"}, "modelName": "DCS-7050"}}}),
            json!({"result": {"value": {"key": {"deviceId": "SN-3"}, "modelName": "cEOSLab"}}}),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/resources/tag/v2/TagAssignmentConfig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "time": "2026-01-01T00:00:02Z"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let fixture = Fixture::new(&server.uri());
    let mut cmd = fixture.cmd();
    cmd.args([
        "run", "process", "--workspace", "ws-run", "--name", "Run", "--label", "site",
        "--value", "lab", "-o", "json",
    ]);
    let output = run(cmd).await;

    output.clone().assert().success();
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report["workspace_ack"],
        json!({"value": {"key": {"workspaceId": "ws-run"}}, "time": "2026-01-01T00:00:00Z"})
    );
    assert_eq!(report["tag_ack"]["value"]["key"]["label"], "site");
    assert_eq!(
        report["assignments"],
        json!([
            {"device_id": "SN-1", "ack": {"time": "2026-01-01T00:00:02Z"}},
            {"device_id": "SN-3", "ack": {"time": "2026-01-01T00:00:02Z"}}
        ])
    );
    assert!(ledger_ids(&fixture.ledger()).contains("workspace_id: ws-run"));
}

#[test]
fn test_connection_refused_exits_with_connection_code() {
    let fixture = Fixture::new(&closed_port_endpoint());
    fixture.cmd().args(["get", "devices"]).assert().code(7);
}
