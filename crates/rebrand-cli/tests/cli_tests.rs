//! End-to-end tests for the `rebrand` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ── helpers ─────────────────────────────────────────────────────────────────

/// A `rebrand` command running inside `dir`, with ambient configuration
/// (per-user file, `REBRAND_*` variables) shut out.
fn rebrand(dir: &Path, config_dir: &TempDir) -> Command {
    let config = config_dir.path().join("empty.toml");
    fs::write(&config, "").unwrap();

    let mut cmd = Command::cargo_bin("rebrand").unwrap();
    cmd.current_dir(dir)
        .env("REBRAND_CONFIG", config)
        .env_remove("REBRAND_RENAME__FROM")
        .env_remove("REBRAND_RENAME__TO")
        .env_remove("RUST_LOG");
    cmd
}

/// Like [`rebrand`] but lets `./.rebrand.toml` be discovered.
fn rebrand_with_local_config(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rebrand").unwrap();
    cmd.current_dir(dir)
        .env_remove("REBRAND_CONFIG")
        .env_remove("REBRAND_RENAME__FROM")
        .env_remove("REBRAND_RENAME__TO")
        .env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "alpha-term/notes.txt", "Term value: alphaTERM");
    write(dir.path(), "src/TermService.cs", "class TermService { } // term");
    dir
}

// ── run ─────────────────────────────────────────────────────────────────────

#[test]
fn run_with_yes_applies_the_rename() {
    let tree = sample_tree();
    let cfg = TempDir::new().unwrap();

    rebrand(tree.path(), &cfg)
        .args(["run", "--from", "term", "--to", "beta", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renaming directories"))
        .stdout(predicate::str::contains("alpha-term -> alpha-beta"))
        .stdout(predicate::str::contains("Summary"))
        .stdout(predicate::str::contains("Next steps"))
        .stdout(predicate::str::contains("dotnet build"));

    assert_eq!(
        fs::read_to_string(tree.path().join("alpha-beta/notes.txt")).unwrap(),
        "Beta value: alphaBETA"
    );
    assert_eq!(
        fs::read_to_string(tree.path().join("src/BetaService.cs")).unwrap(),
        "class BetaService { } // beta"
    );
}

#[test]
fn explicit_root_argument_is_used() {
    let tree = sample_tree();
    let cfg = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();

    rebrand(elsewhere.path(), &cfg)
        .arg("run")
        .arg(tree.path())
        .args(["-f", "term", "-t", "beta", "-y"])
        .assert()
        .success();

    assert!(tree.path().join("alpha-beta").is_dir());
}

#[test]
fn dry_run_reports_without_changing_anything() {
    let tree = sample_tree();
    let cfg = TempDir::new().unwrap();

    rebrand(tree.path(), &cfg)
        .args(["run", "--from", "term", "--to", "beta", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would rename alpha-term -> alpha-beta"))
        .stdout(predicate::str::contains("would update alpha-term/notes.txt"))
        .stdout(predicate::str::contains("Next steps").not());

    assert!(tree.path().join("alpha-term/notes.txt").exists());
    assert_eq!(
        fs::read_to_string(tree.path().join("alpha-term/notes.txt")).unwrap(),
        "Term value: alphaTERM"
    );
}

#[test]
fn second_run_changes_nothing() {
    let tree = sample_tree();
    let cfg = TempDir::new().unwrap();
    let args = ["run", "--from", "term", "--to", "beta", "--yes"];

    rebrand(tree.path(), &cfg).args(args).assert().success();
    rebrand(tree.path(), &cfg)
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "0 file(s) rewritten, 0 file(s) renamed, 0 director(ies) renamed, 0 failure(s)",
        ));
}

#[test]
fn json_output_is_one_document() {
    let tree = sample_tree();
    let cfg = TempDir::new().unwrap();

    let assert = rebrand(tree.path(), &cfg)
        .args([
            "--output-format",
            "json",
            "run",
            "--from",
            "term",
            "--to",
            "beta",
            "--dry-run",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["summary"]["directories_renamed"], 1);
    assert_eq!(value["summary"]["failures"], 0);
    assert_eq!(value["report"]["dry_run"], true);
}

#[test]
fn missing_term_is_a_user_error() {
    let tree = sample_tree();
    let cfg = TempDir::new().unwrap();

    rebrand(tree.path(), &cfg)
        .args(["run", "--from", "term", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No 'to' term given"))
        .stderr(predicate::str::contains("--to"));
}

#[test]
fn identical_terms_are_rejected() {
    let tree = sample_tree();
    let cfg = TempDir::new().unwrap();

    rebrand(tree.path(), &cfg)
        .args(["run", "--from", "term", "--to", "term", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("identical"));
}

#[test]
fn missing_root_is_not_found() {
    let dir = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();

    rebrand(dir.path(), &cfg)
        .args(["run", "does-not-exist", "--from", "a", "--to", "b", "--yes"])
        .assert()
        .code(3);
}

#[test]
fn file_root_is_a_user_error() {
    let tree = sample_tree();
    let cfg = TempDir::new().unwrap();

    rebrand(tree.path(), &cfg)
        .args(["run", "alpha-term/notes.txt", "--from", "term", "--to", "beta", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn confirmation_without_terminal_fails_safely() {
    let tree = sample_tree();
    let cfg = TempDir::new().unwrap();

    rebrand(tree.path(), &cfg)
        .args(["run", "--from", "term", "--to", "beta"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));

    assert!(tree.path().join("alpha-term").exists());
}

#[test]
fn quiet_run_needs_no_confirmation() {
    let tree = sample_tree();
    let cfg = TempDir::new().unwrap();

    rebrand(tree.path(), &cfg)
        .args(["-q", "run", "--from", "term", "--to", "beta"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(tree.path().join("alpha-beta").exists());
}

// ── configuration ───────────────────────────────────────────────────────────

#[test]
fn terms_come_from_local_config() {
    let tree = sample_tree();
    write(
        tree.path(),
        ".rebrand.toml",
        "[rename]\nfrom = \"term\"\nto = \"beta\"\n",
    );

    rebrand_with_local_config(tree.path())
        .args(["run", "--yes"])
        .assert()
        .success();

    assert!(tree.path().join("alpha-beta").exists());
    // The config file itself is never rewritten.
    assert!(
        fs::read_to_string(tree.path().join(".rebrand.toml"))
            .unwrap()
            .contains("from = \"term\"")
    );
}

#[test]
fn local_config_survives_a_custom_exclude_list() {
    let tree = sample_tree();
    write(
        tree.path(),
        ".rebrand.toml",
        "[rename]\nfrom = \"term\"\nto = \"beta\"\n\n[scan]\nexclude_files = [\"LICENSE\"]\n",
    );

    for _ in 0..2 {
        rebrand_with_local_config(tree.path())
            .args(["run", "--yes"])
            .assert()
            .success();
    }

    assert!(tree.path().join("alpha-beta").exists());
    assert!(
        fs::read_to_string(tree.path().join(".rebrand.toml"))
            .unwrap()
            .contains("from = \"term\"")
    );
}

#[test]
fn environment_overrides_config_file() {
    let tree = sample_tree();
    write(
        tree.path(),
        ".rebrand.toml",
        "[rename]\nfrom = \"term\"\nto = \"beta\"\n",
    );

    rebrand_with_local_config(tree.path())
        .env("REBRAND_RENAME__TO", "gamma")
        .args(["run", "--yes"])
        .assert()
        .success();

    assert!(tree.path().join("alpha-gamma").exists());
}

#[test]
fn missing_explicit_config_is_a_config_error() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("rebrand")
        .unwrap()
        .current_dir(dir.path())
        .args(["--config", "absent.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn init_writes_local_config_once() {
    let dir = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();

    rebrand(dir.path(), &cfg)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));

    let written = fs::read_to_string(dir.path().join(".rebrand.toml")).unwrap();
    assert!(written.contains("[scan]"));
    assert!(written.contains("on_decode_error = \"skip\""));

    rebrand(dir.path(), &cfg)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn config_get_and_path() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".rebrand.toml", "[rename]\nfrom = \"maestro\"\n");

    rebrand_with_local_config(dir.path())
        .args(["config", "get", "rename.from"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rename.from = maestro"));

    rebrand_with_local_config(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".rebrand.toml"));
}

#[test]
fn unknown_config_key_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();

    rebrand(dir.path(), &cfg)
        .args(["config", "get", "nope.nothing"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

// ── misc ────────────────────────────────────────────────────────────────────

#[test]
fn completions_mention_binary_name() {
    let dir = TempDir::new().unwrap();
    let cfg = TempDir::new().unwrap();

    rebrand(dir.path(), &cfg)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rebrand"));
}

#[test]
fn help_and_version_exit_zero() {
    Command::cargo_bin("rebrand")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));

    Command::cargo_bin("rebrand")
        .unwrap()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"));
}
