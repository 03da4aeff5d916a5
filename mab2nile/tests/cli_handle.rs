use std::fs;

use assert_cmd::Command;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::tempdir;

const TABLE: &str = "1 = 'Wired Production'\n   1    001e.0b41.7afd    DYNAMIC     Gi1/0/15\n";

#[test]
fn handle_reads_request_from_stdin() {
    let request = json!({ "fileContent": STANDARD.encode(TABLE) }).to_string();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mab2nile"));
    let output = cmd
        .arg("handle")
        .write_stdin(request)
        .output()
        .expect("run handle");
    assert!(output.status.success());

    let response: Value = serde_json::from_slice(&output.stdout).expect("json response");
    assert_eq!(response["detectedMappings"]["1"], "Wired Production");

    let csv = STANDARD
        .decode(response["csvContent"].as_str().expect("csvContent"))
        .expect("base64 csv");
    let csv = String::from_utf8(csv).expect("utf-8 csv");
    assert_eq!(
        csv.lines().nth(1),
        Some("00:1e:0b:41:7a:fd,Wired Production,,,,,Allow,,No,,No")
    );
}

#[test]
fn handle_reads_request_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("request.json");
    fs::write(
        &path,
        json!({
            "fileContent": STANDARD.encode(TABLE),
            "vlanMappings": { "1": "Staff" },
            "includeIpColumns": false
        })
        .to_string(),
    )
    .expect("write request");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mab2nile"));
    let output = cmd.arg("handle").arg(&path).output().expect("run handle");
    assert!(output.status.success());

    let response: Value = serde_json::from_slice(&output.stdout).expect("json response");
    let csv = STANDARD
        .decode(response["csvContent"].as_str().expect("csvContent"))
        .expect("base64 csv");
    let csv = String::from_utf8(csv).expect("utf-8 csv");
    assert_eq!(csv.lines().nth(1), Some("00:1e:0b:41:7a:fd,Staff,,,,,Allow"));
}

#[test]
fn handle_prints_error_body_for_missing_content() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mab2nile"));
    cmd.arg("handle")
        .write_stdin("{}")
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"error\": \"No file content provided\""))
        .stderr(predicate::str::contains("status 400"));
}

#[test]
fn handle_prints_error_body_for_noise_only_table() {
    let request = json!({ "fileContent": STANDARD.encode("nothing useful\n") }).to_string();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mab2nile"));
    cmd.arg("handle")
        .write_stdin(request)
        .assert()
        .failure()
        .stdout(predicate::str::contains("no valid binding entries found"));
}
