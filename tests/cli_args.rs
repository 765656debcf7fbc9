//! Tests for the pbmm2_index binary.
//!
//! These run the built executable and check exit status and output.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn pbmm2_index_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pbmm2_index"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_shows_option_groups() {
    let output = pbmm2_index_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Basic Options"));
    assert!(stdout.contains("Parameter Set Option"));
    assert!(stdout.contains("Parameter Override Options"));
    assert!(stdout.contains("--preset"));
    assert!(stdout.contains("--no-kmer-compression"));
    assert!(stdout.contains("<ref.fa|xml>"));
}

#[test]
fn test_version_includes_commit() {
    let output = pbmm2_index_cmd()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(commit "));
}

#[test]
fn test_zero_kmer_exits_with_failure() {
    let output = pbmm2_index_cmd()
        .args(["--preset", "SUBREAD", "-k", "0", "ref.fa", "out.mmi"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Index parameter -k and -w must be positive"),
        "Expected fatal diagnostic, got: {}",
        stdout
    );
}

#[test]
fn test_unknown_preset_is_a_usage_error() {
    let output = pbmm2_index_cmd()
        .args(["--preset", "HIFI", "ref.fa", "out.mmi"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value"), "got: {}", stderr);
}

#[test]
fn test_valid_invocation_logs_resolved_settings() {
    let output = pbmm2_index_cmd()
        .args([
            "--log-level", "INFO", "--preset", "CCS", "-k", "19", "-w", "10", "-j", "1",
            "ref.fa", "out.mmi",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Resolved index settings"), "got: {}", stdout);
    assert!(stdout.contains("mode=CCS"));
    assert!(stdout.contains("threads=1"));
}

#[test]
fn test_fatal_goes_to_log_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = dir.path().join("index.log");

    let output = pbmm2_index_cmd()
        .arg("--log-file")
        .arg(&log_path)
        .args(["-w", "-5", "ref.fa", "out.mmi"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let log = fs::read_to_string(&log_path).expect("Log file should exist");
    assert!(log.contains("Index parameter -k and -w must be positive"));
    assert!(log.contains("-w -5"));
}

#[test]
fn test_emit_tool_contract() {
    let output = pbmm2_index_cmd()
        .arg("--emit-tool-contract")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let contract: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Tool contract should be JSON");
    assert_eq!(contract["tool_contract_id"], "mapping.tasks.pbmm2_index");
    assert_eq!(contract["tool_contract"]["nproc"], "$max_nproc");
}

#[test]
fn test_resolved_tool_contract_ignores_thread_flag() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let rtc_path = dir.path().join("resolved_tool_contract.json");
    fs::write(
        &rtc_path,
        r#"{
            "resolved_tool_contract": {
                "tool_contract_id": "mapping.tasks.pbmm2_index",
                "input_files": ["ref.referenceset.xml"],
                "output_files": ["out.mmi"],
                "nproc": 1,
                "log_level": "INFO",
                "options": { "mapping.task_options.align_mode": "ISOSEQ" }
            }
        }"#,
    )
    .expect("Failed to write contract");

    let output = pbmm2_index_cmd()
        .arg("--resolved-tool-contract")
        .arg(&rtc_path)
        .args(["-j", "64"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mode=ISOSEQ"), "got: {}", stdout);
    assert!(stdout.contains("threads=1"));
}

#[test]
fn test_unreadable_tool_contract_fails() {
    let output = pbmm2_index_cmd()
        .args(["--resolved-tool-contract", "/nonexistent/rtc.json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read resolved tool contract"));
}
