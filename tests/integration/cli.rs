//! Command-line behavior of the `project-mcp` binary.

use std::path::Path;

use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use project_catalog_mcp::test_utils::fixtures;
use tempfile::TempDir;

use crate::stub::{StubCatalog, TOKEN};

/// Environment variables the binary reads; cleared so the host cannot leak in.
const CONFIG_ENV: &[&str] = &[
    "CEREBRO_TOKEN",
    "CEREBRO_API_BASE_URL",
    "CEREBRO_HTTP_TIMEOUT_SECS",
    "SERVER_PORT",
    "MCP_ENDPOINT",
    "HTTP_MODE",
    "DEPENDENCY_CONCURRENCY",
    "REQUEST_TIMEOUT_SECS",
    "PROJECT_MCP_CONFIG",
    "RUST_LOG",
];

/// A `project-mcp` command isolated from the host configuration.
fn project_mcp(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("project-mcp").unwrap();
    for key in CONFIG_ENV {
        cmd.env_remove(key);
    }
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    project_mcp(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("details"))
        .stdout(predicate::str::contains("dependencies"));
}

#[test]
fn test_blank_permalink_is_rejected_before_token_check() {
    let home = TempDir::new().unwrap();
    project_mcp(home.path())
        .args(["details", "  "])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("project_permalink"))
        .stderr(predicate::str::contains("cannot be empty"))
        .stderr(predicate::str::contains("CEREBRO_TOKEN").not());
}

#[test]
fn test_missing_token_is_reported() {
    let home = TempDir::new().unwrap();
    project_mcp(home.path())
        .args(["dependencies", "checkout"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("CEREBRO_TOKEN environment variable is required"));
}

#[test]
fn test_missing_explicit_config_is_reported() {
    let home = TempDir::new().unwrap();
    project_mcp(home.path())
        .env("CEREBRO_TOKEN", TOKEN)
        .args(["--config", "does-not-exist.toml", "details", "checkout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.toml"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_dependencies_command_prints_report() {
    let stub = StubCatalog::builder()
        .root(&fixtures::project(1, "Checkout"), &fixtures::edges(1, &[8, 999]), &[])
        .project(&fixtures::project(8, "Billing"))
        .start()
        .await;
    let home = TempDir::new().unwrap();
    let mut cmd = project_mcp(home.path());
    cmd.env("CEREBRO_TOKEN", TOKEN)
        .env("CEREBRO_API_BASE_URL", &stub.base_url)
        .args(["dependencies", "checkout", "--max-concurrency", "1"]);

    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap()).await.unwrap();

    output
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Dependencies for Project: Checkout\n"))
        .stdout(predicate::str::contains("## Dependencies (2)"))
        .stdout(predicate::str::contains("### 1. Billing"))
        .stdout(predicate::str::contains("### 2. Project ID 999 (Not Found)"));
    assert_eq!(stub.id_requests().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_details_command_reads_config_file() {
    let stub = StubCatalog::builder()
        .root(&fixtures::project(1, "Checkout"), &[], &[])
        .start()
        .await;
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("project-mcp.toml");
    std::fs::write(
        &config_path,
        format!("token = \"{TOKEN}\"\nbase_url = \"{}\"\n", stub.base_url),
    )
    .unwrap();

    let mut cmd = project_mcp(home.path());
    cmd.env("PROJECT_MCP_CONFIG", &config_path).args(["details", "checkout"]);

    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap()).await.unwrap();

    output
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Project Details for: checkout\n"))
        .stdout(predicate::str::contains("No project repository URLs found."))
        .stdout(predicate::str::contains("No repositories found with matching kube_project."));
    assert_eq!(stub.requests().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unknown_project_exits_with_error() {
    let stub = StubCatalog::builder().start().await;
    let home = TempDir::new().unwrap();
    let mut cmd = project_mcp(home.path());
    cmd.env("CEREBRO_TOKEN", TOKEN)
        .env("CEREBRO_API_BASE_URL", &stub.base_url)
        .args(["details", "ghost"]);

    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap()).await.unwrap();

    output.assert().failure().code(1).stderr(predicate::str::contains("project not found: ghost"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stdio_server_answers_initialize_and_tools_list() {
    let stub = StubCatalog::builder().start().await;
    let home = TempDir::new().unwrap();
    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
    ]
    .join("\n");
    let mut cmd = project_mcp(home.path());
    cmd.env("CEREBRO_TOKEN", TOKEN)
        .env("CEREBRO_API_BASE_URL", &stub.base_url)
        .write_stdin(input);

    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap()).await.unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let responses: Vec<serde_json::Value> =
        stdout.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "project-mcp-server");
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"]["tools"].as_array().map(Vec::len), Some(2));
}
