//! CLI Integration Tests for Polish
//!
//! Runs the built `polish-server` binary for the init, config, agent and
//! rewrite commands.

use polish::AgentRegistry;
use serde_json::json;
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BINARY: &str = env!("CARGO_BIN_EXE_polish-server");

/// Run polish-server with arguments, without colors
fn run_polish(args: &[&str], working_dir: Option<&std::path::Path>) -> Output {
    let mut cmd = Command::new(BINARY);
    cmd.arg("--no-color").args(args).env_remove("POLISH_SERVER_URL");

    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    cmd.output().expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_command() {
    let output = run_polish(&["--help"], None);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Usage"));
    for command in ["init", "config", "agent", "rewrite", "shell"] {
        assert!(out.contains(command), "help is missing {}", command);
    }
}

#[test]
fn test_version_command() {
    let output = run_polish(&["--version"], None);

    assert!(output.status.success());
    assert!(stdout(&output).contains("polish-server"));
}

// =============================================================================
// Init and Config Tests
// =============================================================================

#[test]
fn test_init_then_validate() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_polish(&["init", "--port", "4000"], Some(temp_dir.path()));
    assert!(output.status.success(), "init failed: {}", stderr(&output));

    let content = fs::read_to_string(temp_dir.path().join("polish.toml")).unwrap();
    assert!(content.contains("port = 4000"));
    assert!(temp_dir.path().join(".env.example").exists());

    let output = run_polish(&["config", "--validate"], Some(temp_dir.path()));
    assert!(output.status.success());
    assert!(stdout(&output).contains("is valid"));
}

#[test]
fn test_init_failure_reported_once() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("taken"), "not a directory").unwrap();

    let output = run_polish(&["init", "taken/project"], Some(temp_dir.path()));

    assert!(!output.status.success());
    assert_eq!(stderr(&output).matches("Failed to create").count(), 1);
}

#[test]
fn test_config_reports_credential_without_value() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("polish.toml"),
        "[provider]\napi_key_env = \"POLISH_CLI_TEST_KEY\"\n",
    )
    .unwrap();

    let output = Command::new(BINARY)
        .args(["--no-color", "config"])
        .env("POLISH_CLI_TEST_KEY", "sk-very-secret")
        .current_dir(temp_dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("set (POLISH_CLI_TEST_KEY)"));
    assert!(!out.contains("sk-very-secret"));
}

#[test]
fn test_config_validate_rejects_bad_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("polish.toml"),
        "[provider]\ntemperature = 5.0\n",
    )
    .unwrap();

    let output = run_polish(&["config", "--validate"], Some(temp_dir.path()));
    assert!(!output.status.success());
    assert!(stderr(&output).contains("temperature"));
}

// =============================================================================
// Agent Command Tests
// =============================================================================

#[test]
fn test_agent_list() {
    let output = run_polish(&["agent", "list"], None);

    assert!(output.status.success());
    let out = stdout(&output);
    for agent in AgentRegistry::builtin().list() {
        assert!(out.contains(&agent.id));
    }
}

#[test]
fn test_agent_show() {
    let output = run_polish(&["agent", "show", "commit"], None);

    assert!(output.status.success());
    let registry = AgentRegistry::builtin();
    let commit = registry.find_by_id("commit").unwrap();
    assert!(stdout(&output).contains(&commit.name));
}

#[test]
fn test_agent_show_unknown() {
    let output = run_polish(&["agent", "show", "nonexistent"], None);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("nonexistent"));
}

// =============================================================================
// Rewrite Command Tests
// =============================================================================

async fn mock_polish_server(result: serde_json::Value, status: u16) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/agents"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"agents": AgentRegistry::builtin().infos()})),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/agents"))
        .respond_with(ResponseTemplate::new(status).set_body_json(result))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn test_rewrite_prints_result() {
    let server = mock_polish_server(json!({"result": "feat: add login"}), 200).await;

    let output = tokio::process::Command::new(BINARY)
        .args([
            "--no-color",
            "rewrite",
            "--agent",
            "commit",
            "--server",
            &server.uri(),
            "added login",
        ])
        .output()
        .await
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "feat: add login");
}

#[tokio::test]
async fn test_rewrite_reports_server_error() {
    let server = mock_polish_server(json!({"error": "Unknown agent."}), 404).await;

    let output = tokio::process::Command::new(BINARY)
        .args(["--no-color", "rewrite", "--server", &server.uri(), "hello"])
        .output()
        .await
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown agent."));
}

#[tokio::test]
async fn test_rewrite_rejects_unknown_agent_locally() {
    let server = mock_polish_server(json!({"result": "unused"}), 200).await;

    let output = tokio::process::Command::new(BINARY)
        .args([
            "--no-color",
            "rewrite",
            "--agent",
            "haiku",
            "--server",
            &server.uri(),
            "hello",
        ])
        .output()
        .await
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown agent"));
}
