// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{GitDescribe, GitQuery, GixBackend, ShellBackend};
use crate::git::tests::{commit, init_test_repo, temp_dir};

#[test]
fn test_gix_head_message() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    commit(temp.path(), "Add the parser\n\nWith a body line.");

    let message = GixBackend::head_message(temp.path()).unwrap();
    assert!(message.starts_with("Add the parser"));
    assert!(message.contains("With a body line."));
}

#[test]
fn test_gix_head_message_without_commits() {
    let temp = temp_dir();
    gix::init(temp.path()).expect("failed to init repo");
    assert!(GixBackend::head_message(temp.path()).is_err());
}

#[test]
fn test_shell_backend_command_failure_carries_stderr() {
    let temp = temp_dir();
    let err = ShellBackend::default()
        .git_command(&["rev-parse", "HEAD"], temp.path())
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("git rev-parse HEAD"), "{message}");
}

#[test]
fn test_shell_backend_missing_git() {
    let temp = temp_dir();
    let backend = ShellBackend::new("nonexistent_git_12345");
    assert!(backend.describe(temp.path(), "M").is_err());
}
