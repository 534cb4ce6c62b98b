//! Integration tests for the lahan binary
//!
//! Every run uses the in-memory store, so no parcel service is needed.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn lahan(dir: &tempfile::TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_lahan"));
    command
        .current_dir(dir.path())
        .env_remove("LAHAN_STORE_URL")
        .env_remove("LAHAN_PROXIMITY_TOLERANCE")
        .env_remove("LAHAN_CROSS_CHECK")
        .env_remove("LAHAN_REQUEST_TIMEOUT")
        .env("RUST_LOG", "warn");
    command
}

fn run_with_stdin(command: &mut Command, script: &str) -> Output {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start lahan");

    child.stdin.take().unwrap().write_all(script.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_json_list_is_valid() {
    let dir = tempfile::tempdir().unwrap();
    let output = lahan(&dir).args(["--memory", "--json", "list"]).output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["data"]["parcels"], serde_json::json!([]));
    assert_eq!(parsed["data"]["warehouses"], serde_json::json!([]));
}

#[test]
fn test_config_reports_sources() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("lahan.toml"), "proximity_tolerance = 0.005\n").unwrap();

    let output = lahan(&dir).args(["--json", "--timeout", "0", "config"]).output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = parsed["data"].as_array().unwrap();
    let find = |key: &str| rows.iter().find(|r| r["key"] == key).unwrap().clone();

    assert_eq!(find("proximity_tolerance")["source"], "File");
    assert_eq!(find("request_timeout")["value"], "disabled");
    assert_eq!(find("store_url")["value"], "http://localhost:8000/api");
}

#[test]
fn test_draw_session_saves_parcel() {
    let dir = tempfile::tempdir().unwrap();
    let script = "\
click -5.30 105.40
click -5.30 105.41
click -5.31 105.41
click -5.31 105.40
click -5.3002 105.4001
status
name Plot A
save
quit
";
    let output = run_with_stdin(lahan(&dir).args(["--memory", "draw"]), script);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Boundary closed"), "stdout: {}", stdout);
    assert!(stdout.contains("Parcel 'Plot A' saved"), "stdout: {}", stdout);
}

#[test]
fn test_draw_rejects_save_without_name() {
    let dir = tempfile::tempdir().unwrap();
    let script = "mode warehouse\nclick -5.35 105.5\nsave\nbogus\nquit\n";
    let output = run_with_stdin(lahan(&dir).args(["--memory", "draw"]), script);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Name must not be empty"), "stderr: {}", stderr);
    assert!(stderr.contains("Unknown command: bogus"), "stderr: {}", stderr);
}

#[test]
fn test_export_writes_feature_collection() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("catalog.geojson");

    let output = lahan(&dir)
        .args(["--memory", "export", "--output"])
        .arg(&target)
        .output()
        .unwrap();
    assert!(output.status.success());

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(written["type"], "FeatureCollection");
}

#[test]
fn test_delete_unknown_record_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = lahan(&dir).args(["--memory", "delete", "parcel", "42", "--yes"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}
