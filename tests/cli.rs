//! Tests that run the `rotalog` binary end to end.
#![cfg(feature = "cli")]

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

/// Runs with an absent settings file so the user's own config never leaks in.
fn rotalog(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rotalog"));
    cmd.arg("--config").arg(dir.join("absent.toml"));
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("failed to run rotalog")
}

#[test]
fn rotate_moves_the_file_to_the_first_backup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, "old line\n").unwrap();

    let output = run(rotalog(dir.path())
        .arg("rotate")
        .arg(&path)
        .args(["--backups", "2"]));

    assert!(output.status.success());
    assert!(!path.exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("app.1.log")).unwrap(),
        "old line\n"
    );
}

#[test]
fn rotate_of_a_missing_file_succeeds() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");

    let output = run(rotalog(dir.path()).arg("rotate").arg(&path));

    assert!(output.status.success());
    assert!(!path.exists());
    assert!(!dir.path().join("app.1.log").exists());
}

#[test]
fn rotate_into_a_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope").join("app.log");

    let output = run(rotalog(dir.path()).arg("rotate").arg(&path));

    assert!(!output.status.success());
}

#[test]
fn pipe_logs_each_stdin_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("p.log");

    let mut child = rotalog(dir.path())
        .arg("--file")
        .arg(&path)
        .args(["--no-console", "pipe"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run rotalog");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"a\nb\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 2, "{content:?}");
    assert!(lines[0].ends_with(" INFO a"), "{content:?}");
    assert!(lines[1].ends_with(" INFO b"), "{content:?}");
}

#[test]
fn pipe_uses_the_requested_level() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("p.log");

    let mut child = rotalog(dir.path())
        .arg("--file")
        .arg(&path)
        .args(["--no-console", "pipe", "--level", "error"])
        .stdin(Stdio::piped())
        .spawn()
        .expect("failed to run rotalog");
    child.stdin.take().unwrap().write_all(b"tail").unwrap();

    assert!(child.wait().unwrap().success());
    assert!(
        fs::read_to_string(&path)
            .unwrap()
            .ends_with(" EROR tail\n")
    );
}

#[test]
fn log_writes_one_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("l.log");

    let output = run(rotalog(dir.path())
        .arg("--file")
        .arg(&path)
        .args(["--no-console", "--name", "job: ", "log", "warn", "disk", "almost", "full"]));

    assert!(output.status.success());
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.ends_with(" WARN job: disk almost full\n"), "{content:?}");
}

#[test]
fn log_below_the_file_threshold_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("l.log");

    let output = run(rotalog(dir.path())
        .arg("--file")
        .arg(&path)
        .args(["--no-console", "log", "debug", "noise"]));

    assert!(output.status.success());
    assert!(fs::read_to_string(&path).unwrap_or_default().is_empty());
}

#[test]
fn log_to_stderr_by_default() {
    let dir = tempdir().unwrap();

    let output = run(rotalog(dir.path()).args(["log", "error", "boom"]));

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.ends_with(" EROR boom\n"), "{stderr:?}");
}

#[test]
fn log_without_message_is_a_usage_error() {
    let dir = tempdir().unwrap();
    let output = run(rotalog(dir.path()).args(["log", "info"]));
    assert!(!output.status.success());
}
