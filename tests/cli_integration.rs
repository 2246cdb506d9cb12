//! CLI integration tests for Slipway.
//!
//! These tests exercise the CLI surface without network access: recipe
//! validation, the idempotency gate's rebuild reporting, cleaning, and the
//! failure paths that must abort before any later stage runs.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the slipway binary command.
fn slipway() -> Command {
    Command::cargo_bin("slipway").unwrap()
}

/// Create a temporary directory for test workspaces.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// A record the gate will reject for its fingerprint.
fn write_stale_record(root: &Path) {
    fs::create_dir_all(root.join(".slipway")).unwrap();
    fs::write(
        root.join(".slipway/record.json"),
        r#"{
  "version": 1,
  "package": "av",
  "module": "av",
  "upstream_url": "https://github.com/PyAV-Org/PyAV",
  "commit": "0123456789abcdef0123456789abcdef01234567",
  "vendor_url": "https://example.com/ffmpeg-manylinux_x86_64.tar.gz",
  "platform": "manylinux_x86_64",
  "fingerprint": "stale",
  "staged_libs": ["libavcodec.so.60"],
  "module_version": "12.3.0",
  "built_at": 1700000000
}"#,
    )
    .unwrap();
}

// ============================================================================
// slipway status
// ============================================================================

#[test]
fn test_status_on_fresh_workspace() {
    let tmp = temp_dir();

    slipway()
        .arg("status")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("not built"))
        .stdout(predicate::str::contains("rebuild required"));
}

#[test]
fn test_status_reports_recipe_change() {
    let tmp = temp_dir();

    fs::create_dir_all(tmp.path().join("lib_native")).unwrap();
    fs::write(tmp.path().join("lib_native/libavcodec.so.60"), "elf").unwrap();
    write_stale_record(tmp.path());

    slipway()
        .arg("status")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("package:   av"))
        .stdout(predicate::str::contains("recipe changed since last build"));
}

#[test]
fn test_status_reports_missing_artifact_despite_record() {
    let tmp = temp_dir();

    // A record alone must never read as "built": the artifact is gone.
    write_stale_record(tmp.path());

    slipway()
        .arg("status")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "no shared objects in runtime library directory",
        ));
}

// ============================================================================
// slipway clean
// ============================================================================

#[test]
fn test_clean_on_empty_workspace() {
    let tmp = temp_dir();

    slipway()
        .arg("clean")
        .current_dir(tmp.path())
        .assert()
        .success();
}

#[test]
fn test_clean_removes_artifacts_and_all_removes_record() {
    let tmp = temp_dir();

    fs::create_dir_all(tmp.path().join("lib_native")).unwrap();
    fs::write(tmp.path().join("lib_native/libx.so"), "elf").unwrap();
    fs::create_dir_all(tmp.path().join("build/binding-src")).unwrap();
    write_stale_record(tmp.path());

    slipway()
        .arg("clean")
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(!tmp.path().join("lib_native").exists());
    assert!(!tmp.path().join("build/binding-src").exists());
    assert!(tmp.path().join(".slipway/record.json").exists());

    slipway()
        .args(["clean", "--all"])
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(!tmp.path().join(".slipway").exists());
}

// ============================================================================
// slipway build (failure paths)
// ============================================================================

#[test]
fn test_build_rejects_template_without_placeholder() {
    let tmp = temp_dir();

    fs::write(
        tmp.path().join("Slipway.toml"),
        r#"
[vendor]
url_template = "https://example.com/ffmpeg-linux.tar.gz"
"#,
    )
    .unwrap();

    slipway()
        .arg("build")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("{platform}"));

    // Validation fires before any filesystem or network work.
    assert!(!tmp.path().join("lib_native").exists());
    assert!(!tmp.path().join("build").exists());
}

#[test]
fn test_bare_invocation_defaults_to_build() {
    let tmp = temp_dir();

    fs::write(
        tmp.path().join("Slipway.toml"),
        r#"
[vendor]
url_template = "https://example.com/ffmpeg-linux.tar.gz"
"#,
    )
    .unwrap();

    slipway()
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("{platform}"));
}

#[test]
fn test_build_clone_failure_runs_no_later_stage() {
    let tmp = temp_dir();

    fs::write(
        tmp.path().join("Slipway.toml"),
        r#"
[upstream]
url = "file:///slipway-nonexistent/repo.git"
"#,
    )
    .unwrap();

    slipway()
        .arg("build")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));

    // No vendor fetch, no compile, no record.
    assert!(!tmp.path().join("build/binding-src/vendor").exists());
    assert!(!tmp.path().join(".slipway/record.json").exists());
}

// ============================================================================
// slipway verify
// ============================================================================

#[test]
fn test_verify_failure_exits_with_probe_status() {
    let tmp = temp_dir();

    // An interpreter that cannot exist makes the probe outcome
    // deterministic regardless of the host's Python installation.
    fs::write(
        tmp.path().join("Slipway.toml"),
        r#"
[python]
interpreter = "slipway-nonexistent-python"
"#,
    )
    .unwrap();

    slipway()
        .arg("verify")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("slipway-nonexistent-python"));
}
