//! Integration tests for the gatectl CLI
//!
//! These tests run the built binary against a policy file written to a
//! temporary directory and check exit codes and JSON output.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const POLICY: &str = r#"apiVersion: accessgate/v1
kind: Policy
spec:
  roles:
    - name: admin
      permissions:
        - "create:users"
        - "edit:users"
        - "delete:users"
    - name: editor
      permissions:
        - "edit:users"
    - name: viewer
      permissions:
        - "view:users"
  userRoles:
    - editor
"#;

fn write_policy(temp: &TempDir) -> PathBuf {
    let path = temp.path().join("policy.yaml");
    std::fs::write(&path, POLICY).unwrap();
    path
}

fn gatectl(policy: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gatectl"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd.arg(args[0]).arg("--policy").arg(policy).args(&args[1..]);
    cmd.output().expect("Failed to run gatectl")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "gatectl output is not JSON ({}):\n{}",
            e,
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn test_check_granted_exits_zero() {
    let temp = TempDir::new().unwrap();
    let policy = write_policy(&temp);

    let output = gatectl(&policy, &["check", "--permission", "edit:users"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("GRANTED"));
}

#[test]
fn test_check_denied_exits_one() {
    let temp = TempDir::new().unwrap();
    let policy = write_policy(&temp);

    let output = gatectl(&policy, &["check", "--permission", "delete:users"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("DENIED"));
}

#[test]
fn test_check_role_and_permission_combined() {
    let temp = TempDir::new().unwrap();
    let policy = write_policy(&temp);

    let granted = gatectl(&policy, &["check", "--permission", "edit:users", "--role", "editor"]);
    let denied = gatectl(&policy, &["check", "--permission", "edit:users", "--role", "admin"]);

    assert_eq!(granted.status.code(), Some(0));
    assert_eq!(denied.status.code(), Some(1));
}

/// Test: --as-role replaces the policy's userRoles
#[test]
fn test_as_role_overrides_policy_user_roles() {
    let temp = TempDir::new().unwrap();
    let policy = write_policy(&temp);

    let output = gatectl(
        &policy,
        &["check", "--permission", "delete:users", "--as-role", "admin", "--format", "json"],
    );
    assert_eq!(output.status.code(), Some(0));

    let json = stdout_json(&output);
    assert_eq!(json["userRoles"], serde_json::json!(["admin"]));

    // editor is no longer held once overridden
    let output = gatectl(&policy, &["check", "--role", "editor", "--as-role", "admin"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_check_json_keys() {
    let temp = TempDir::new().unwrap();
    let policy = write_policy(&temp);

    let output = gatectl(&policy, &["check", "--permission", "delete:users", "--format", "json"]);
    assert_eq!(output.status.code(), Some(1));

    let json = stdout_json(&output);
    assert_eq!(json["decision"], "denied");
    assert_eq!(json["gate"]["required_permission"], "delete:users");
    assert!(json["gate"].get("required_role").is_none());
    assert_eq!(json["userRoles"], serde_json::json!(["editor"]));
}

#[test]
fn test_roles_json_keys() {
    let temp = TempDir::new().unwrap();
    let policy = write_policy(&temp);

    let output = gatectl(&policy, &["roles", "--as-role", "viewer", "--as-role", "ghost", "--format", "json"]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    let granted = json["grantedRoles"].as_array().unwrap();
    assert_eq!(granted.len(), 1);
    assert_eq!(granted[0]["name"], "viewer");
    assert_eq!(json["permissions"], serde_json::json!(["view:users"]));
    assert_eq!(json["unknownRoles"], serde_json::json!(["ghost"]));
}

#[test]
fn test_validate_reports_valid_policy() {
    let temp = TempDir::new().unwrap();
    let policy = write_policy(&temp);

    let output = gatectl(&policy, &["validate"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Policy is valid"));
}

#[test]
fn test_missing_policy_fails() {
    let temp = TempDir::new().unwrap();

    let output = gatectl(&temp.path().join("absent.yaml"), &["validate"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load policy"));
}
