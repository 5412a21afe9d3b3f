//! Integration tests for top-level CLI behavior.
//!
//! Pipeline scenarios run against cassettes through `T3PO_REPLAY`, so no
//! network access is needed.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::Utc;
use serde_json::{json, Value};

use t3po::cassette::format::{Cassette, Interaction};

const MNIST: &str = "Write evaluation module for MNIST classifier";

fn run_t3po(args: &[&str], cassette: Option<&Path>) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_t3po");
    let mut cmd = Command::new(bin);
    cmd.args(args)
        .env_remove("T3PO_RECORD")
        .env_remove("T3PO_REPLAY")
        .env("T3PO_LOG", "off")
        .env("JIRA_USER", "alice")
        .env("JIRA_PROJECT_KEY", "PROJ");
    if let Some(path) = cassette {
        cmd.env("T3PO_REPLAY", path);
    }
    cmd.output().expect("failed to run t3po binary")
}

fn interaction(seq: u64, port: &str, method: &str, output: Value) -> Interaction {
    Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
}

fn completion(body: &Value) -> Value {
    json!({"ok": {"text": body.to_string()}})
}

fn write_cassette(name: &str, interactions: Vec<Interaction>) -> PathBuf {
    let dir = std::env::temp_dir().join("t3po_cli_tests");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{name}.cassette.yaml"));
    let cassette = Cassette {
        name: name.into(),
        recorded_at: Utc::now(),
        version: "test".into(),
        interactions,
    };
    std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    path
}

fn well_scoped_llm() -> Vec<Interaction> {
    let scope = json!({
        "Description": "Evaluate the MNIST classifier on the test set.",
        "Sub-Tasks": ["1. Load data", "2. Report accuracy"]
    });
    vec![
        interaction(0, "llm", "complete", completion(&json!({"Task Title": MNIST, "Detailed Scope": scope}))),
        interaction(
            1,
            "llm",
            "complete",
            completion(&json!({"Task Title": MNIST, "Detailed Scope": scope, "Scope Quality": "Well-scoped"})),
        ),
    ]
}

#[test]
fn generate_prints_formatted_description() {
    let cassette = write_cassette("generate_only", well_scoped_llm());
    let output = run_t3po(&["generate", MNIST], Some(&cassette));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Task Title: Write evaluation module for MNIST classifier"));
    assert!(stdout.contains("*Description*: Evaluate the MNIST classifier on the test set."));
    assert!(stdout.contains("*Sub-Tasks*: \n1. Load data\n2. Report accuracy\n"));
}

#[test]
fn generate_and_submit_prints_confirmation() {
    let mut interactions = well_scoped_llm();
    interactions.push(interaction(
        2,
        "issues",
        "create_issue",
        json!({"ok": {"key": "PROJ-123", "id": "10123"}}),
    ));
    let cassette = write_cassette("generate_submit", interactions);
    let output = run_t3po(&["generate", MNIST, "--submit"], Some(&cassette));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Successfully created Jira issue: PROJ-123"));
}

#[test]
fn poorly_scoped_title_exits_with_error() {
    let cassette = write_cassette(
        "poorly_scoped",
        vec![
            interaction(0, "llm", "complete", completion(&json!({"Task Title": "Update UI", "Detailed Scope": "ERROR - NOT APPROPRIATE TASK"}))),
            interaction(
                1,
                "llm",
                "complete",
                completion(&json!({"Task Title": "Update UI", "Detailed Scope": "ERROR - NOT APPROPRIATE TASK", "Scope Quality": "Poorly-scoped"})),
            ),
        ],
    );
    let output = run_t3po(&["generate", "Update UI", "--submit"], Some(&cassette));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("are not well-scoped"));
}

#[test]
fn short_title_is_rejected_before_any_service_call() {
    // An empty cassette panics on any port call.
    let cassette = write_cassette("empty", vec![]);
    let output = run_t3po(&["generate", "Fix bug"], Some(&cassette));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Please enter a valid task title (more than 8 characters)."));
}

#[test]
fn missing_api_key_is_reported_as_generation_failure() {
    let output = Command::new(env!("CARGO_BIN_EXE_t3po"))
        .args(["generate", MNIST])
        .current_dir(std::env::temp_dir())
        .env_remove("T3PO_RECORD")
        .env_remove("T3PO_REPLAY")
        .env("OPENAI_API_KEY", "")
        .env("T3PO_LOG", "off")
        .output()
        .expect("failed to run t3po binary");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Failed to generate task details due to: OPENAI_API_KEY is not set"));
}

#[test]
fn help_lists_subcommands_and_jira_options() {
    let output = run_t3po(&["--help"], None);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("session"));
    assert!(stdout.contains("--jira-url"));
    assert!(stdout.contains("--project-key"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_t3po(&["nonsense"], None);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
