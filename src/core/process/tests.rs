// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::builder::ProcessBuilder;
use crate::error::{BsysError, ProcessError, exit_code_of};

fn process_error(err: &anyhow::Error) -> &ProcessError {
    match err.downcast_ref::<BsysError>() {
        Some(BsysError::Process(inner)) => inner,
        other => panic!("expected a process error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_process_echo() {
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .capture_stdout()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout().trim(), @"hello");
}

#[tokio::test]
async fn test_process_non_zero_exit_is_typed() {
    let err = ProcessBuilder::new("sh")
        .args(["-c", "exit 3"])
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        process_error(&err),
        ProcessError::NonZeroExit { code: 3, .. }
    ));
    assert_eq!(exit_code_of(&err), 3);
}

#[tokio::test]
async fn test_process_env_added_to_inherited() {
    let output = ProcessBuilder::new("sh")
        .args(["-c", "echo \"$BSYS_TEST_VAR:${PATH:+has-path}\""])
        .env("BSYS_TEST_VAR", "test_value")
        .capture_stdout()
        .run()
        .await
        .expect("process should succeed");

    insta::assert_snapshot!(output.stdout().trim(), @"test_value:has-path");
}

#[tokio::test]
async fn test_process_cwd() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "x").unwrap();

    let output = ProcessBuilder::new("ls")
        .cwd(dir.path())
        .capture_stdout()
        .run()
        .await
        .unwrap();
    assert_eq!(output.stdout().trim(), "marker.txt");
}

#[tokio::test]
async fn test_process_missing_executable() {
    let err = ProcessBuilder::new("nonexistent_program_12345")
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        process_error(&err),
        ProcessError::ExecutableNotFound { .. }
    ));
    assert_eq!(exit_code_of(&err), 1);
}

#[tokio::test]
async fn test_process_cancellation() {
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let err = ProcessBuilder::new("sleep")
        .arg("30")
        .run_with_cancellation(token)
        .await
        .unwrap_err();

    assert!(matches!(
        process_error(&err),
        ProcessError::Interrupted { .. }
    ));
}

#[tokio::test]
async fn test_process_already_cancelled_does_not_spawn() {
    let token = CancellationToken::new();
    token.cancel();

    let err = ProcessBuilder::new("nonexistent_program_12345")
        .run_with_cancellation(token)
        .await
        .unwrap_err();
    assert!(matches!(
        process_error(&err),
        ProcessError::Interrupted { .. }
    ));
}

#[test]
fn test_from_argv() {
    assert!(ProcessBuilder::from_argv::<&str>(&[]).is_none());

    let builder = ProcessBuilder::from_argv(&["python3", "-m", "unittest"]).unwrap();
    assert_eq!(builder.command_line(), "python3 -m unittest");

    let builder = ProcessBuilder::new("git").args(["commit", "-m", "two words"]);
    assert_eq!(builder.command_line(), "git commit -m \"two words\"");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_killed_by_signal() {
    let err = ProcessBuilder::new("sh")
        .args(["-c", "kill -SEGV $$"])
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        process_error(&err),
        ProcessError::Signaled { signal: 11, .. }
    ));
    assert_eq!(exit_code_of(&err), 139);
}

#[test]
fn test_executable_lookup() {
    let path = ProcessBuilder::find("sh").unwrap();
    assert!(path.exists());

    let builder = ProcessBuilder::which(&path).unwrap();
    assert_eq!(builder.program(), &path);

    let program = "nonexistent_program_12345";
    assert!(ProcessBuilder::find(program).is_none());
    let err = ProcessBuilder::which(program).unwrap_err();
    assert!(err.to_string().contains(program));
}
