//! Detect phase against real app directories

mod support;

use php_compat::buildplan::{BuildPlan, Required};
use php_compat::config::CompatConfig;
use php_compat::detect::{run_detect, DetectOutcome};
use php_compat::fs::RealFileSystem;
use php_compat::progress::{MigrationEvent, RecordingHandler};
use std::fs;
use support::{copy_fixture, fixture_path, write};
use tempfile::TempDir;

fn detect_fixture(name: &str) -> DetectOutcome {
    let fs = RealFileSystem::new();
    let config = CompatConfig::new(fixture_path(name));
    run_detect(&config, &fs, &RecordingHandler::new()).unwrap()
}

fn plan_of(outcome: DetectOutcome) -> BuildPlan {
    match outcome {
        DetectOutcome::Pass(plan) => plan,
        DetectOutcome::Fail => panic!("Expected detection to pass"),
    }
}

#[test]
fn test_httpd_app_requires_httpd() {
    let plan = plan_of(detect_fixture("simple_app_httpd"));
    assert_eq!(
        plan.requirement("httpd"),
        Some(&Required::new("httpd").with_metadata("launch", true))
    );
    assert!(plan.requirement("php").is_none());
}

#[test]
fn test_nginx_app_requires_nginx() {
    let plan = plan_of(detect_fixture("simple_app_nginx"));
    assert!(plan.requirement("nginx").is_some());
    assert!(plan.requirement("httpd").is_none());
}

#[test]
fn test_php_version_token_is_translated() {
    let plan = plan_of(detect_fixture("php_with_php_ini_d"));
    let php = plan.requirement("php").unwrap();
    assert_eq!(php.version, "7.2.*");
    assert_eq!(php.metadata.get("version-source").and_then(|v| v.as_str()), Some("buildpack.yml"));
    assert_eq!(php.metadata.get("launch").and_then(|v| v.as_bool()), Some(true));
}

#[test]
fn test_custom_web_dir_is_used_for_web_app_check() {
    let plan = plan_of(detect_fixture("composer_app"));
    assert!(plan.requirement("httpd").is_some());
    assert_eq!(plan.requirement("php").unwrap().version, "7.4.*");
}

#[test]
fn test_root_index_without_web_dir_requires_no_web_server() {
    let plan = plan_of(detect_fixture("simple_app_moves_files"));
    assert!(plan.requirement("httpd").is_none());
    assert_eq!(plan.requirement("php").unwrap().version, "7.3.*");
}

#[test]
fn test_extensions_folder_fails_detection() {
    let fs = RealFileSystem::new();
    let config = CompatConfig::new(fixture_path("extensions_app"));
    let handler = RecordingHandler::new();

    let outcome = run_detect(&config, &fs, &handler).unwrap();

    assert_eq!(outcome, DetectOutcome::Fail);
    assert!(handler.contains(&MigrationEvent::ExtensionsFolderPresent));
    assert!(handler
        .messages()
        .iter()
        .any(|m| m.contains("Use of .extensions folder has been removed")));
}

#[test]
fn test_migrated_app_fails_detection() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "buildpack.yml", "php:\n  version: 7.4.*\n");
    write(dir.path(), "htdocs/index.php", "<?php\n");

    let fs = RealFileSystem::new();
    let outcome = run_detect(&CompatConfig::new(dir.path()), &fs, &RecordingHandler::new()).unwrap();
    assert_eq!(outcome, DetectOutcome::Fail);
}

#[test]
fn test_both_files_still_pass_detection() {
    let dir = copy_fixture("simple_app_httpd");
    write(dir.path(), "buildpack.yml", "");

    let fs = RealFileSystem::new();
    let outcome = run_detect(&CompatConfig::new(dir.path()), &fs, &RecordingHandler::new()).unwrap();
    assert!(matches!(outcome, DetectOutcome::Pass(_)));
}

#[test]
fn test_plan_is_written_as_toml() {
    let dir = TempDir::new().unwrap();
    let plan_path = dir.path().join("plan.toml");
    let fs = RealFileSystem::new();

    let plan = plan_of(detect_fixture("php_with_php_ini_d"));
    plan.write(&fs, &plan_path).unwrap();

    let written = fs::read_to_string(&plan_path).unwrap();
    assert!(written.contains("[[provides]]"));
    assert!(written.contains("name = \"php-compat\""));
    assert!(written.contains("version = \"7.2.*\""));

    let parsed: toml::Value = toml::from_str(&written).unwrap();
    let requires = parsed.get("requires").and_then(|r| r.as_array()).unwrap();
    assert_eq!(requires.len(), 3);
}
