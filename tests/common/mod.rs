// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// `bsys` binary rooted at `root`, with variables that change its behavior
/// removed from the environment.
pub fn bsys(root: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bsys"));
    cmd.current_dir(root)
        .env_remove("REVISION")
        .env_remove("GITHUB_REF")
        .env_remove("CI_COMMIT_MESSAGE");
    cmd
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub fn code(output: &Output) -> i32 {
    output.status.code().expect("terminated by signal")
}

/// Runs git with a fixed identity and signing disabled, panicking on failure.
pub fn git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args([
            "-c",
            "user.email=test@example.com",
            "-c",
            "user.name=Test",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "tag.gpgsign=false",
        ])
        .args(args)
        .current_dir(path)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Repository with one commit of `tracked.txt`.
pub fn init_repo(path: &Path) {
    git(path, &["init", "--quiet"]);
    commit(path, "initial");
}

pub fn commit(path: &Path, message: &str) {
    let file = path.join("tracked.txt");
    let previous = std::fs::read_to_string(&file).unwrap_or_default();
    std::fs::write(&file, format!("{previous}{message}\n")).expect("failed to write file");
    git(path, &["add", "tracked.txt"]);
    git(path, &["commit", "--quiet", "-m", message]);
}

pub fn tag(path: &Path, name: &str) {
    git(path, &["tag", "-a", name, "-m", name]);
}

/// Builds a ZIP archive of stored (uncompressed) text files.
pub fn stored_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, text) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(text.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Whether an external tool can be found on PATH.
pub fn have(tool: &str) -> bool {
    which::which(tool).is_ok()
}
