// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::loader::parse_set_option;
use super::types::RevisionFormat;
use super::{Config, ConfigLoader};
use crate::error::{EXIT_USAGE, exit_code_of};
use crate::logging::LogLevel;

#[test]
fn test_default_config() {
    let config = Config::default();
    insta::assert_yaml_snapshot!(
        serde_json::json!({
            "global.dry": config.global.dry,
            "global.output_log_level": config.global.output_log_level.as_u8(),
            "revision.file": config.revision.file,
            "revision.fallback": config.revision.fallback,
            "update.branch": config.update.branch,
            "update.directory": config.update.directory,
            "header.output": config.header.output,
        }),
        @r#"
    global.dry: false
    global.output_log_level: 2
    header.output: all.h
    revision.fallback: 0.0.0
    revision.file: REVISION
    update.branch: master
    update.directory: BuildSystem
    "#
    );
}

#[test]
fn test_revision_format_from_flag() {
    assert_eq!(RevisionFormat::from_flag("python"), RevisionFormat::Python);
    assert_eq!(RevisionFormat::from_flag("Python"), RevisionFormat::Python);
    assert_eq!(RevisionFormat::from_flag("default"), RevisionFormat::Default);
    assert_eq!(RevisionFormat::from_flag("rpm"), RevisionFormat::Default);
    assert_eq!(RevisionFormat::from_flag(""), RevisionFormat::Default);
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
dry = true
output_log_level = 4

[revision]
fallback = "1.0.0"
format = "default"

[update]
branch = "develop"
"#;

    let config = Config::parse(toml).unwrap();
    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.revision.fallback, "1.0.0");
    assert_eq!(config.revision.format, RevisionFormat::Default);
    assert_eq!(config.update.branch, "develop");
    assert_eq!(config.update.directory, PathBuf::from("BuildSystem"));
}

#[test]
fn test_builtin_targets_present() {
    let config = Config::default();
    let names: Vec<_> = config.targets().into_keys().collect();
    insta::assert_debug_snapshot!(names, @r#"
    [
        "analyze",
        "build",
        "check",
        "clean",
        "install",
        "prereqs",
    ]
    "#);
}

#[test]
fn test_clean_removes_configured_revision_file() {
    let config = Config::parse("[revision]\nfile = \"VERSION.txt\"\n").unwrap();
    let clean = config.targets().remove("clean").unwrap();
    assert_eq!(clean.remove.last().map(String::as_str), Some("VERSION.txt"));
    assert!(!clean.remove.iter().any(|p| p == "REVISION"));
}

#[test]
fn test_prereqs_gated_on_manifest() {
    let prereqs = Config::default().targets().remove("prereqs").unwrap();
    assert_eq!(
        prereqs.requires_file,
        Some(PathBuf::from("Dependencies/prereqs.json"))
    );
}

#[test]
fn test_target_override_is_field_level() {
    let config = Config::parse(
        r#"
[targets.check]
commands = [["pytest", "-q"]]
"#,
    )
    .unwrap();

    let check = config.targets().remove("check").unwrap();
    assert_eq!(check.commands, vec![vec!["pytest".to_string(), "-q".to_string()]]);
    // untouched fields come from the built-in definition
    assert_eq!(check.depends, vec!["build".to_string()]);
    assert_eq!(check.description, "Run the unit tests");
}

#[test]
fn test_empty_requires_file_clears_gate() {
    let config = Config::parse(
        r#"
[targets.prereqs]
requires_file = ""
"#,
    )
    .unwrap();
    assert!(config.targets()["prereqs"].requires_file.is_none());
}

#[test]
fn test_custom_target() {
    let config = Config::parse(
        r#"
[targets.docs]
description = "Build the documentation"
depends = ["build"]
commands = [["sphinx-build", "docs", "build/docs"]]
"#,
    )
    .unwrap();

    let targets = config.targets();
    let docs = &targets["docs"];
    assert_eq!(docs.depends, vec!["build".to_string()]);
    assert!(!docs.revision);
    assert!(!targets.contains_key("nope"));
}

#[test]
fn test_empty_command_rejected() {
    let result = Config::parse(
        r#"
[targets.docs]
commands = [[]]
"#,
    );
    let err = result.unwrap_err().to_string();
    assert!(err.contains("targets.docs"), "{err}");
}

#[test]
fn test_invalid_header_output_rejected() {
    let result = Config::parse(
        r#"
[header]
output = "include/all.h"
"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_absolute_update_directory_rejected() {
    let result = Config::parse(
        r#"
[update]
directory = "/opt/BuildSystem"
"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_deny_unknown_fields_top_level() {
    let toml = r#"
[global]
dry = true

[unknown_section]
foo = "bar"
"#;
    assert!(Config::parse(toml).is_err());
}

#[test]
fn test_deny_unknown_fields_in_target() {
    let toml = r#"
[targets.build]
command = ["make"]
"#;
    assert!(Config::parse(toml).is_err());
}

#[test]
fn test_config_loader_tracks_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[global]\n dry = true")
        .add_toml_file_optional("/nonexistent/optional.toml");

    insta::assert_debug_snapshot!(loader.format_loaded_files(), @r#"
    [
        "1. [string] <string>",
    ]
    "#);
}

#[test]
fn test_config_loader_file_sources() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("bsys.toml");
    let extra = dir.path().join("extra.toml");
    std::fs::write(&project, "[update]\nbranch = \"develop\"\n").unwrap();
    std::fs::write(&extra, "[update]\nbranch = \"release\"\n").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file_optional(&project)
        .add_toml_file(&extra)
        .build()
        .unwrap();
    assert_eq!(config.update.branch, "release");
}

#[test]
fn test_config_loader_missing_required_file() {
    let result = ConfigLoader::new()
        .add_toml_file("/nonexistent/required.toml")
        .build();
    assert!(result.is_err());
}

#[test]
fn test_set_option_overrides_file() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\ndry = false\n[revision]\nfallback = \"1.0.0\"")
        .set_option("global/dry=true")
        .unwrap()
        .set_option("revision/fallback=2.0.0")
        .unwrap()
        .build()
        .unwrap();

    assert!(config.global.dry);
    assert_eq!(config.revision.fallback, "2.0.0");
}

#[test]
fn test_parse_set_option() {
    assert_eq!(
        parse_set_option("update/branch=develop").unwrap(),
        ("update.branch".to_string(), "develop".to_string())
    );
    assert_eq!(
        parse_set_option("targets/build/revision=false").unwrap(),
        ("targets.build.revision".to_string(), "false".to_string())
    );
    assert_eq!(
        parse_set_option("update/url=https://host/a?b=c").unwrap().1,
        "https://host/a?b=c"
    );

    let err = parse_set_option("branch=develop").unwrap_err();
    assert_eq!(exit_code_of(&err), EXIT_USAGE);
    assert!(parse_set_option("update/branch").is_err());
    assert!(parse_set_option("update//x=1").is_err());
}

#[test]
fn test_format_options_deterministic() {
    let config = Config::default();
    let first = config.format_options();
    assert_eq!(first, config.format_options());

    let keys: Vec<_> = first
        .iter()
        .filter_map(|line| line.split_once(" = ").map(|(k, _)| k.trim().to_string()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(keys.iter().any(|k| k == "targets.check.depends"));
}
