// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the build-system updater using wiremock.
//!
//! The archive is served from a mock server and extracted with the real
//! `unzip`; tests that need it return early when it is not installed.

mod common;

use bsys_rs::config::types::{ToolsConfig, UpdateConfig};
use bsys_rs::error::exit_code_of;
use bsys_rs::net::ProgressDisplay;
use bsys_rs::update::BuildSystemUpdater;
use common::{have, stored_zip, temp_dir};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve_archive(branch: &str, entries: &[(&str, &str)]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/archive/{branch}.zip")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(stored_zip(entries)))
        .mount(&server)
        .await;
    server
}

fn updater(root: &Path, server: &MockServer, branch: Option<&str>) -> BuildSystemUpdater {
    let update = UpdateConfig {
        url: format!("{}/archive/{{branch}}.zip", server.uri()),
        ..UpdateConfig::default()
    };
    BuildSystemUpdater::from_config(root, &update, &ToolsConfig::default(), branch)
        .progress(ProgressDisplay::Silent)
}

fn entries_in(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn update_replaces_vendored_directory() {
    if !have("unzip") {
        eprintln!("unzip not installed, skipping");
        return;
    }

    let temp = temp_dir();
    std::fs::create_dir(temp.path().join("BuildSystem")).unwrap();
    std::fs::write(temp.path().join("BuildSystem/old.mk"), "old").unwrap();

    let server = serve_archive(
        "master",
        &[
            ("BuildSystem-master/BuildSystem/common/license_scanner.py", "# scanner\n"),
            ("BuildSystem-master/BuildSystem/python/python_analyzer.py", "# analyzer\n"),
            ("BuildSystem-master/README.md", "readme\n"),
        ],
    )
    .await;

    updater(temp.path(), &server, None).run().await.unwrap();

    assert_eq!(
        std::fs::read_to_string(temp.path().join("BuildSystem/common/license_scanner.py")).unwrap(),
        "# scanner\n"
    );
    assert!(!temp.path().join("BuildSystem/old.mk").exists());
    assert!(temp.path().join("BuildSystem.bak/old.mk").exists());
    // staging directory and archive are gone
    assert_eq!(entries_in(temp.path()), vec!["BuildSystem", "BuildSystem.bak"]);
}

#[tokio::test]
async fn update_create_with_branch() {
    if !have("unzip") {
        eprintln!("unzip not installed, skipping");
        return;
    }

    let temp = temp_dir();
    let server = serve_archive(
        "develop",
        &[("BuildSystem-develop/BuildSystem/VERSION", "develop\n")],
    )
    .await;

    updater(temp.path(), &server, Some("develop"))
        .create(true)
        .run()
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(temp.path().join("BuildSystem/VERSION")).unwrap(),
        "develop\n"
    );
    assert_eq!(entries_in(temp.path()), vec!["BuildSystem"]);
}

#[tokio::test]
async fn update_rejects_unexpected_archive_layout() {
    if !have("unzip") {
        eprintln!("unzip not installed, skipping");
        return;
    }

    let temp = temp_dir();
    std::fs::create_dir(temp.path().join("BuildSystem")).unwrap();
    let server = serve_archive("master", &[("something-else/file.txt", "x")]).await;

    let err = updater(temp.path(), &server, None).run().await.unwrap_err();

    assert_eq!(exit_code_of(&err), 255);
    assert!(err.to_string().contains("BuildSystem-master"), "{err}");
    // no rollback: only the backup remains
    assert_eq!(entries_in(temp.path()), vec!["BuildSystem.bak"]);
}

#[tokio::test]
async fn update_http_error_exits_one() {
    let temp = temp_dir();
    std::fs::create_dir(temp.path().join("BuildSystem")).unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    // the unzip tool is checked up front but never reached
    let update = UpdateConfig {
        url: format!("{}/archive/{{branch}}.zip", server.uri()),
        ..UpdateConfig::default()
    };
    let tools = ToolsConfig {
        unzip: "sh".into(),
        ..ToolsConfig::default()
    };
    let err = BuildSystemUpdater::from_config(temp.path(), &update, &tools, None)
        .progress(ProgressDisplay::Silent)
        .run()
        .await
        .unwrap_err();

    assert_eq!(exit_code_of(&err), 1);
    assert!(format!("{err:#}").contains("404"), "{err:#}");
}
