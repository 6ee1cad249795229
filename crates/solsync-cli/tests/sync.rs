use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use httptest::{matchers::request, responders::status_code, Expectation, Server};
use serde_json::{json, Value};
use tempfile::TempDir;

fn solsync() -> Command {
    Command::cargo_bin("solsync").expect("solsync binary")
}

fn manifest_fixture(temp: &TempDir) -> PathBuf {
    let path = temp.path().join("list.json");
    let document = json!({
        "builds": {
            "0.8.0-linux-amd64": {
                "url": ["https://example/solc-v0.8.0"],
                "keccak256": "0x11",
                "sha256": "0x22"
            }
        },
        "latestRelease": "0.8.0"
    });
    fs::write(&path, serde_json::to_string_pretty(&document).expect("render"))
        .expect("write manifest");
    path
}

fn upstream_server(body: &Value) -> Server {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/list.json"))
            .respond_with(status_code(200).body(body.to_string())),
    );
    server
}

fn read_manifest(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read manifest")).expect("valid json")
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).to_string()
}

fn stderr_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stderr).to_string()
}

#[test]
fn merges_upstream_build_into_existing_manifest() {
    let temp = tempfile::tempdir().expect("tempdir");
    let manifest = manifest_fixture(&temp);
    let server = upstream_server(&json!({
        "builds": [
            {
                "path": "solc-v0.8.1",
                "version": "0.8.1",
                "keccak256": "0xaa",
                "sha256": "0xbb"
            }
        ]
    }));

    let assert = solsync()
        .args([
            manifest.to_str().expect("utf8 path"),
            &server.url_str("/list.json"),
            "linux-amd64",
        ])
        .assert()
        .success();
    assert!(stdout_of(&assert).contains("1 added"));

    let document = read_manifest(&manifest);
    let builds = document["builds"].as_object().expect("builds table");
    assert!(builds.contains_key("0.8.0-linux-amd64"));
    let added = &builds["0.8.1-linux-amd64"];
    assert_eq!(
        added["url"],
        json!(["https://github.com/ethereum/solc-bin/raw/gh-pages/linux-amd64/solc-v0.8.1"])
    );
    assert_eq!(added["keccak256"], "0xaa");
    assert_eq!(added["sha256"], "0xbb");
    assert_eq!(document["latestRelease"], "0.8.0");
}

#[test]
fn json_flag_emits_envelope() {
    let temp = tempfile::tempdir().expect("tempdir");
    let manifest = manifest_fixture(&temp);
    let server = upstream_server(&json!({
        "builds": [
            {
                "path": "solc-v0.8.1",
                "version": "0.8.1",
                "keccak256": "0xaa",
                "sha256": "0xbb"
            }
        ]
    }));

    let assert = solsync()
        .args([
            "--json",
            manifest.to_str().expect("utf8 path"),
            &server.url_str("/list.json"),
            "linux-amd64",
        ])
        .assert()
        .success();

    let payload: Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("json envelope");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["details"]["platform"], "linux-amd64");
    assert_eq!(payload["details"]["added"], 1);
    assert_eq!(payload["details"]["replaced"], 0);
}

#[test]
fn quiet_flag_suppresses_stdout() {
    let temp = tempfile::tempdir().expect("tempdir");
    let manifest = manifest_fixture(&temp);
    let server = upstream_server(&json!({ "builds": [] }));

    let assert = solsync()
        .args([
            "--quiet",
            manifest.to_str().expect("utf8 path"),
            &server.url_str("/list.json"),
            "linux-amd64",
        ])
        .assert()
        .success();
    assert!(stdout_of(&assert).is_empty());
}

#[test]
fn missing_manifest_exits_nonzero_with_path() {
    let assert = solsync()
        .args([
            "/nonexistent/list.json",
            "http://localhost:9/list.json",
            "linux-amd64",
        ])
        .assert()
        .failure();
    assert!(stderr_of(&assert).contains("/nonexistent/list.json"));
}

#[test]
fn malformed_upstream_descriptor_fails_and_preserves_manifest() {
    let temp = tempfile::tempdir().expect("tempdir");
    let manifest = manifest_fixture(&temp);
    let before = fs::read_to_string(&manifest).expect("read manifest");
    let server = upstream_server(&json!({
        "builds": [
            { "path": "solc-v0.8.1", "version": "0.8.1", "keccak256": "0xaa" }
        ]
    }));

    let assert = solsync()
        .args([
            manifest.to_str().expect("utf8 path"),
            &server.url_str("/list.json"),
            "linux-amd64",
        ])
        .assert()
        .failure();
    assert!(stderr_of(&assert).contains("missing field `sha256`"));

    assert_eq!(fs::read_to_string(&manifest).expect("read manifest"), before);
}
