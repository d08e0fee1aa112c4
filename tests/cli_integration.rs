//! CLI integration tests
//!
//! These tests run the planbox binary and verify:
//! - Command parsing and validation
//! - Output formatting
//! - Error handling
//! - Exit codes

mod support;

use std::fs;
use std::process::{Command, Output};
use support::{fixture_path, planbox_binary, write_project};
use tempfile::TempDir;

fn planbox(args: &[&str]) -> Output {
    Command::new(planbox_binary())
        .args(args)
        .env_remove("PLANBOX_LOG_LEVEL")
        .env_remove("PLANBOX_LOG_JSON")
        .env_remove("PLANBOX_FORMAT")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute planbox")
}

#[test]
fn test_cli_help() {
    let output = planbox(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("planbox"));
    assert!(stdout.contains("plan"));
    assert!(stdout.contains("generate"));
}

#[test]
fn test_cli_version() {
    let output = planbox(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_plan_flask_fixture() {
    let repo = fixture_path("single-language", "python-flask");
    let output = planbox(&["plan", repo.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("FROM docker.io/library/python:3.8.2-slim-buster\n"));
    assert!(stdout.ends_with("CMD gunicorn --bind :8080 app:app\n"));
}

#[test]
fn test_plan_json_format() {
    let repo = fixture_path("single-language", "java-maven");
    let output = planbox(&["plan", repo.to_str().unwrap(), "--format", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(value["ecosystem"], "java");
    assert_eq!(value["meta"]["framework"], "springboot");
    assert!(value["dockerfile"]
        .as_str()
        .unwrap()
        .ends_with("-Dserver.port=$PORT -jar target/*.jar"));
}

#[test]
fn test_format_from_environment() {
    let repo = fixture_path("single-language", "node-npm");
    let output = Command::new(planbox_binary())
        .args(["plan", repo.to_str().unwrap()])
        .env("PLANBOX_FORMAT", "yaml")
        .output()
        .expect("Failed to execute planbox");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ecosystem: nodejs\n"));
    assert!(stdout.contains("packageManager: npm\n"));
}

#[test]
fn test_invalid_environment_config() {
    let output = Command::new(planbox_binary())
        .args(["plan"])
        .env("PLANBOX_LOG_JSON", "maybe")
        .output()
        .expect("Failed to execute planbox");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("PLANBOX_LOG_JSON"));
}

#[test]
fn test_plan_forced_ecosystem() {
    let dir = write_project(&[("requirements.txt", "flask\n")]);
    let output = planbox(&[
        "plan",
        dir.path().to_str().unwrap(),
        "--ecosystem",
        "static",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("FROM docker.io/library/nginx:alpine as runtime\n"));
}

#[test]
fn test_plan_nonexistent_path() {
    let output = planbox(&["plan", "/nonexistent/path/12345"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
}

#[test]
fn test_plan_file_instead_of_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("file.txt");
    fs::write(&file_path, "content").expect("Failed to write file");

    let output = planbox(&["plan", file_path.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a directory"));
}

#[test]
fn test_plan_output_file() {
    let repo = fixture_path("single-language", "static-site");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let target = temp_dir.path().join("Dockerfile");

    let output = planbox(&[
        "plan",
        repo.to_str().unwrap(),
        "--output",
        target.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let written = fs::read_to_string(&target).expect("Dockerfile not written");
    assert!(written.ends_with("EXPOSE 8080\n"));
}

#[test]
fn test_generate_with_overrides() {
    let output = planbox(&[
        "generate",
        "--ecosystem",
        "java",
        "--set",
        "type=gradle",
        "--set",
        "jdk=21",
    ]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "FROM docker.io/library/gradle:8.1.0-jdk21-alpine
WORKDIR /src
COPY . .
RUN gradle build
CMD java -jar build/libs/*.jar
"
    );
}

#[test]
fn test_generate_from_meta_file() {
    let dir = write_project(&[(
        "meta.json",
        r#"{"packageManager": "npm", "startCommand": "start", "nodeVersion": "20"}"#,
    )]);
    let meta_path = dir.path().join("meta.json");

    let output = planbox(&[
        "generate",
        "-e",
        "node",
        "--meta",
        meta_path.to_str().unwrap(),
        "--set",
        "startCommand=serve",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("FROM node:20 \n"));
    assert!(stdout.ends_with("CMD npm run serve\n"));
}

#[test]
fn test_generate_invalid_override() {
    let output = planbox(&["generate", "-e", "python", "--set", "install"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid override"));
}

#[test]
fn test_generate_non_string_meta() {
    let dir = write_project(&[("meta.json", r#"{"jdk": 17}"#)]);
    let meta_path = dir.path().join("meta.json");

    let output = planbox(&["generate", "-e", "java", "-m", meta_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid metadata file"));
    assert!(stderr.contains("JSON object of string values"));
}

#[test]
fn test_generate_missing_meta_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let meta_path = temp_dir.path().join("absent.json");

    let output = planbox(&["generate", "-e", "python", "-m", meta_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read metadata file"));
    assert!(stderr.contains("absent.json"));
}

#[test]
fn test_unknown_ecosystem_rejected() {
    let output = planbox(&["generate", "--ecosystem", "cobol"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown ecosystem: cobol"));
}

#[test]
fn test_invalid_log_level_rejected() {
    let output = planbox(&["plan", "--log-level", "bogus"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bogus"));
    assert!(!stderr.contains("defaulting to INFO"));
}
