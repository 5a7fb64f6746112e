//! Exit codes and error messages of the `trellis` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn trellis(cwd: &Path, config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("trellis").unwrap();
    cmd.current_dir(cwd)
        .env_remove("RUST_LOG")
        .env_remove("TRELLIS_BLUEPRINTS_DIR")
        .env_remove("TRELLIS__DEFAULTS__BLUEPRINT")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(config);
    cmd
}

fn sandbox() -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("trellis-config.toml");
    let work = temp.path().join("work");
    fs::create_dir(&work).unwrap();
    (temp, config)
}

fn work(temp: &TempDir) -> std::path::PathBuf {
    temp.path().join("work")
}

#[test]
fn invalid_name_exits_2_with_reason() {
    let (temp, config) = sandbox();
    for name in ["abc-", "abc-.", "!"] {
        trellis(&work(&temp), &config)
            .args(["new", name, "--dry-run"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid-name"));
    }
}

#[test]
fn trailing_hyphen_reason_is_reported() {
    let (temp, config) = sandbox();
    trellis(&work(&temp), &config)
        .args(["new", "abc-def-", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot end with '-'"));
}

#[test]
fn unknown_blueprint_exits_3() {
    let (temp, config) = sandbox();
    trellis(&work(&temp), &config)
        .args(["new", "foo", "-b", "nope", "--dry-run"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown-blueprint"));
}

#[test]
fn generating_inside_a_project_is_refused() {
    let (temp, config) = sandbox();
    trellis(&work(&temp), &config)
        .args(["new", "outer", "--skip-git", "--skip-install"])
        .assert()
        .success();

    let inner_cwd = work(&temp).join("outer/src");
    trellis(&inner_cwd, &config)
        .args(["new", "inner", "--skip-git", "--skip-install"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nested-project"));

    assert!(!inner_cwd.join("inner").exists());
}

#[test]
fn directory_inside_a_project_is_refused() {
    let (temp, config) = sandbox();
    trellis(&work(&temp), &config)
        .args(["new", "outer", "--skip-git", "--skip-install"])
        .assert()
        .success();

    trellis(&work(&temp), &config)
        .args([
            "new",
            "inner",
            "--directory",
            "outer/sub",
            "--skip-git",
            "--skip-install",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nested-project"));

    assert!(!work(&temp).join("outer/sub").exists());
}

#[test]
fn non_empty_target_without_force_exits_2() {
    let (temp, config) = sandbox();
    let target = work(&temp).join("foo");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("notes.txt"), "x").unwrap();

    trellis(&work(&temp), &config)
        .args(["new", "foo", "--yes", "--skip-git", "--skip-install"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("target-exists"))
        .stderr(predicate::str::contains("--force"));

    assert!(!target.join("package.json").exists());
}

#[test]
fn dry_run_still_reports_conflicts() {
    let (temp, config) = sandbox();
    let target = work(&temp).join("foo");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("notes.txt"), "x").unwrap();

    trellis(&work(&temp), &config)
        .args(["new", "foo", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("target-exists"));
}

#[test]
fn unknown_config_key_exits_4() {
    let (temp, config) = sandbox();
    trellis(&work(&temp), &config)
        .args(["config", "get", "does.not.exist"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn malformed_config_file_exits_4() {
    let (temp, config) = sandbox();
    fs::write(&config, "[defaults\nblueprint = ").unwrap();

    trellis(&work(&temp), &config)
        .arg("list")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn unknown_argument_exits_2() {
    let (temp, config) = sandbox();
    trellis(&work(&temp), &config)
        .args(["new", "foo", "--lang", "rust"])
        .assert()
        .code(2);
}
