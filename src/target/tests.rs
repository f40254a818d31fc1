// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::config::Config;
use crate::config::types::TargetConfig;
use crate::error::{BsysError, ConfigError, exit_code_of};

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn sh(script: &str) -> Vec<String> {
    names(&["sh", "-c", script])
}

fn target(depends: &[&str], commands: Vec<Vec<String>>) -> TargetConfig {
    TargetConfig {
        depends: names(depends),
        commands,
        ..TargetConfig::default()
    }
}

fn config_error(err: BsysError) -> ConfigError {
    match err {
        BsysError::Config(inner) => *inner,
        other => panic!("expected config error, got {other:?}"),
    }
}

// =============================================================================
// Planning
// =============================================================================

#[test]
fn test_plan_builtin_order() {
    let order = plan(&Config::default().targets(), &names(&["check", "install"])).unwrap();
    insta::assert_debug_snapshot!(order, @r#"
    [
        "build",
        "check",
        "install",
    ]
    "#);
}

#[test]
fn test_plan_deduplicates_requests() {
    let order = plan(&Config::default().targets(), &names(&["build", "check", "build"])).unwrap();
    assert_eq!(order, names(&["build", "check"]));
}

#[test]
fn test_plan_unknown_target() {
    let err = plan(&Config::default().targets(), &names(&["deploy"])).unwrap_err();
    assert!(matches!(config_error(err), ConfigError::UnknownTarget(name) if name == "deploy"));
}

#[test]
fn test_plan_unknown_dependency() {
    let mut targets = BTreeMap::new();
    targets.insert("docs".to_string(), target(&["sphinx"], Vec::new()));

    let err = plan(&targets, &names(&["docs"])).unwrap_err();
    assert!(matches!(config_error(err), ConfigError::UnknownTarget(name) if name == "sphinx"));
}

#[test]
fn test_plan_rejects_cycle() {
    let mut targets = BTreeMap::new();
    targets.insert("a".to_string(), target(&["b"], Vec::new()));
    targets.insert("b".to_string(), target(&["c"], Vec::new()));
    targets.insert("c".to_string(), target(&["a"], Vec::new()));

    let err = plan(&targets, &names(&["a"])).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"dependency cycle between targets: a -> b -> c -> a");
}

#[test]
fn test_plan_self_dependency() {
    let mut targets = BTreeMap::new();
    targets.insert("loop".to_string(), target(&["loop"], Vec::new()));

    let err = plan(&targets, &names(&["loop"])).unwrap_err();
    assert!(matches!(config_error(err), ConfigError::DependencyCycle(path) if path == "loop -> loop"));
}

#[test]
fn test_substitute() {
    let arg = substitute(
        "--out={root}/dist/pkg-{version}.tar.gz",
        &[(ROOT_PLACEHOLDER, "/work"), (VERSION_PLACEHOLDER, "1.2.3")],
    );
    assert_eq!(arg, "--out=/work/dist/pkg-1.2.3.tar.gz");
}

// =============================================================================
// Running
// =============================================================================

#[tokio::test]
async fn test_prereqs_skipped_without_manifest() {
    let temp = temp_dir();
    let runner = TargetRunner::new(temp.path(), Config::default().targets());

    runner.run(&names(&["prereqs"])).await.unwrap();
}

#[tokio::test]
async fn test_requires_file_present_runs_commands() {
    let temp = temp_dir();
    std::fs::create_dir(temp.path().join("Dependencies")).unwrap();
    std::fs::write(temp.path().join("Dependencies/prereqs.json"), "[]").unwrap();

    let mut targets = BTreeMap::new();
    targets.insert(
        "prereqs".to_string(),
        TargetConfig {
            commands: vec![sh("touch scanned")],
            requires_file: Some("Dependencies/prereqs.json".into()),
            ..TargetConfig::default()
        },
    );

    TargetRunner::new(temp.path(), targets)
        .run(&names(&["prereqs"]))
        .await
        .unwrap();
    assert!(temp.path().join("scanned").exists());
}

#[tokio::test]
async fn test_failing_dependency_halts_and_propagates_code() {
    let temp = temp_dir();
    let mut targets = BTreeMap::new();
    targets.insert("first".to_string(), target(&[], vec![sh("exit 7")]));
    targets.insert(
        "second".to_string(),
        target(&["first"], vec![sh("touch second-ran")]),
    );

    let err = TargetRunner::new(temp.path(), targets)
        .run(&names(&["second"]))
        .await
        .unwrap_err();

    assert_eq!(exit_code_of(&err), 7);
    assert!(format!("{err:#}").contains("target 'first' failed"), "{err:#}");
    assert!(!temp.path().join("second-ran").exists());
}

#[tokio::test]
async fn test_commands_run_in_order_in_root() {
    let temp = temp_dir();
    let mut targets = BTreeMap::new();
    targets.insert(
        "steps".to_string(),
        target(
            &[],
            vec![sh("echo one >> log.txt"), sh("echo two >> log.txt")],
        ),
    );

    TargetRunner::new(temp.path(), targets)
        .run(&names(&["steps"]))
        .await
        .unwrap();

    let log = std::fs::read_to_string(temp.path().join("log.txt")).unwrap();
    assert_eq!(log, "one\ntwo\n");
}

#[tokio::test]
async fn test_clean_removes_artifacts() {
    let temp = temp_dir();
    std::fs::create_dir_all(temp.path().join("build/lib")).unwrap();
    std::fs::create_dir_all(temp.path().join("dist")).unwrap();
    std::fs::create_dir_all(temp.path().join("pkg.egg-info")).unwrap();
    std::fs::write(temp.path().join("REVISION"), "1.0.0\n").unwrap();
    std::fs::write(temp.path().join("setup.py"), "").unwrap();

    TargetRunner::new(temp.path(), Config::default().targets())
        .run(&names(&["clean"]))
        .await
        .unwrap();

    let mut left: Vec<String> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    left.sort();
    assert_eq!(left, vec!["setup.py"]);
}

#[tokio::test]
async fn test_version_placeholder_resolved_once_and_exported() {
    let temp = temp_dir();
    let mut targets = BTreeMap::new();
    targets.insert(
        "stamp".to_string(),
        target(
            &[],
            vec![names(&[
                "sh",
                "-c",
                "printf '%s:%s' \"$1\" \"$REVISION\" > stamp.txt",
                "sh",
                "{version}",
            ])],
        ),
    );
    targets.insert(
        "where".to_string(),
        target(&["stamp"], vec![sh("printf '%s' \"$PWD\" > where.txt")]),
    );

    TargetRunner::new(temp.path(), targets)
        .run(&names(&["where"]))
        .await
        .unwrap();

    // not a repository: the fallback applies
    let stamp = std::fs::read_to_string(temp.path().join("stamp.txt")).unwrap();
    assert_eq!(stamp, "0.0.0:0.0.0");
    assert_eq!(
        std::fs::read_to_string(temp.path().join("REVISION")).unwrap(),
        "0.0.0\n"
    );
    assert!(temp.path().join("where.txt").exists());
}

#[tokio::test]
async fn test_dry_run_touches_nothing() {
    let temp = temp_dir();
    std::fs::create_dir(temp.path().join("build")).unwrap();
    let mut targets = Config::default().targets();
    targets.insert(
        "build".to_string(),
        TargetConfig {
            commands: vec![sh("touch built")],
            revision: true,
            ..TargetConfig::default()
        },
    );

    TargetRunner::new(temp.path(), targets)
        .with_dry_run(true)
        .run(&names(&["clean", "build"]))
        .await
        .unwrap();

    assert!(temp.path().join("build").is_dir());
    assert!(!temp.path().join("built").exists());
    assert!(!temp.path().join("REVISION").exists());
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let temp = temp_dir();
    let mut targets = BTreeMap::new();
    targets.insert("t".to_string(), target(&[], vec![sh("touch ran")]));

    let token = CancellationToken::new();
    token.cancel();
    let err = TargetRunner::new(temp.path(), targets)
        .with_cancel_token(token)
        .run(&names(&["t"]))
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("interrupted"), "{err:#}");
    assert!(!temp.path().join("ran").exists());
}
