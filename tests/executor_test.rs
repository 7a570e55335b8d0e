//! Tests for the subprocess executor against a real interpreter
//!
//! `sh` is used as the runtime because it is present on every unix host.

#![cfg(unix)]

use apishift::validation::{CodeExecutor, ProcessExecutor, ScriptRuntime};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn sh_executor(dir: &Path, timeout: Duration) -> ProcessExecutor {
    ProcessExecutor::new(ScriptRuntime::new("sh", "sh"), dir, timeout)
}

fn leftover_scripts(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with("temp_"))
        .collect()
}

#[tokio::test]
async fn test_clean_exit_succeeds() {
    let dir = TempDir::new().unwrap();
    let executor = sh_executor(dir.path(), Duration::from_secs(10));

    let outcome = executor.execute("echo migrated").await;

    assert!(outcome.succeeded);
    assert_eq!(outcome.exit_code, Some(0));
    assert_eq!(outcome.output.trim(), "migrated");
    assert!(outcome.diagnostic.is_empty());
}

#[tokio::test]
async fn test_stderr_alone_does_not_fail() {
    let dir = TempDir::new().unwrap();
    let executor = sh_executor(dir.path(), Duration::from_secs(10));

    let outcome = executor.execute("echo 'deprecated call' >&2").await;

    assert!(outcome.succeeded);
    assert!(outcome.output.contains("deprecated call"));
}

#[tokio::test]
async fn test_non_zero_exit_fails_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    let executor = sh_executor(dir.path(), Duration::from_secs(10));

    let outcome = executor
        .execute("echo partial\necho 'TypeError: newApi is not a function' >&2\nexit 3")
        .await;

    assert!(!outcome.succeeded);
    assert_eq!(outcome.exit_code, Some(3));
    assert!(outcome.diagnostic.contains("exited with status 3"));
    assert!(outcome
        .diagnostic
        .contains("TypeError: newApi is not a function"));
    assert!(outcome.output.contains("partial"));
}

#[tokio::test]
async fn test_timeout_fails() {
    let dir = TempDir::new().unwrap();
    let executor = sh_executor(dir.path(), Duration::from_millis(300));

    let outcome = executor.execute("sleep 5").await;

    assert!(!outcome.succeeded);
    assert!(outcome.exit_code.is_none());
    assert!(outcome.diagnostic.contains("timed out"));
    assert!(outcome.duration < Duration::from_secs(5));
}

#[tokio::test]
async fn test_timeout_keeps_partial_output() {
    let dir = TempDir::new().unwrap();
    let executor = sh_executor(dir.path(), Duration::from_secs(1));

    let outcome = executor
        .execute("echo partial-progress\necho err-line >&2\nsleep 5")
        .await;

    assert!(!outcome.succeeded);
    assert!(outcome.exit_code.is_none());
    assert!(outcome.diagnostic.starts_with("timed out after 1 seconds"));
    assert!(outcome.diagnostic.contains("--- stderr ---\nerr-line"));
    assert!(outcome.diagnostic.contains("--- stdout ---\npartial-progress"));
    assert!(outcome.output.contains("partial-progress"));
    assert!(outcome.duration < Duration::from_secs(5));
    assert!(leftover_scripts(dir.path()).is_empty());
}

#[tokio::test]
async fn test_missing_runtime_fails_to_launch() {
    let dir = TempDir::new().unwrap();
    let executor = ProcessExecutor::new(
        ScriptRuntime::new("apishift-no-such-interpreter", "js"),
        dir.path(),
        Duration::from_secs(10),
    );

    let outcome = executor.execute("console.log('x')").await;

    assert!(!outcome.succeeded);
    assert!(outcome.exit_code.is_none());
    assert!(outcome.diagnostic.contains("failed to launch"));
}

#[tokio::test]
async fn test_runtime_args_precede_script() {
    let dir = TempDir::new().unwrap();
    let runtime = ScriptRuntime::new("sh", "sh").with_args(vec!["-e".to_string()]);
    let executor = ProcessExecutor::new(runtime, dir.path(), Duration::from_secs(10));

    let outcome = executor.execute("false\necho unreachable").await;

    assert!(!outcome.succeeded);
    assert!(!outcome.output.contains("unreachable"));
}

#[tokio::test]
async fn test_script_runs_in_work_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("marker.txt"), "here").unwrap();
    let executor = sh_executor(dir.path(), Duration::from_secs(10));

    let outcome = executor.execute("cat marker.txt").await;

    assert!(outcome.succeeded);
    assert_eq!(outcome.output.trim(), "here");
}

#[tokio::test]
async fn test_temporary_script_is_removed() {
    let dir = TempDir::new().unwrap();
    let executor = sh_executor(dir.path(), Duration::from_millis(300));

    executor.execute("exit 0").await;
    executor.execute("exit 1").await;
    executor.execute("sleep 5").await;

    assert!(leftover_scripts(dir.path()).is_empty());
}

#[tokio::test]
async fn test_script_name_is_unique_per_run() {
    let dir = TempDir::new().unwrap();
    let executor = sh_executor(dir.path(), Duration::from_secs(10));

    let first = executor.execute("basename \"$0\"").await;
    let second = executor.execute("basename \"$0\"").await;

    assert!(first.succeeded && second.succeeded);
    let first_name = first.output.trim();
    assert!(first_name.starts_with("temp_"));
    assert!(first_name.ends_with(".sh"));
    assert_ne!(first_name, second.output.trim());
}
