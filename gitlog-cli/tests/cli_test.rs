use anyhow::Result;
use assert_cmd::cargo::cargo_bin_cmd;
use gitlog_test_utils::{GitRepoTestGuard, create_branch};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn help_lists_flags() {
  cargo_bin_cmd!("gitlog")
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("--merges"))
    .stdout(predicate::str::contains("--local"))
    .stdout(predicate::str::contains("--format"))
    .stdout(predicate::str::contains("--no-copy"));
}

#[test]
fn fails_outside_a_repository_before_prompting() {
  let temp_dir = TempDir::new().unwrap();
  let config_dir = TempDir::new().unwrap();

  cargo_bin_cmd!("gitlog")
    .env("NO_COLOR", "1")
    .env("GITLOG_CONFIG", config_dir.path().join("config.toml"))
    .current_dir(temp_dir.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn fails_for_missing_directory() {
  let temp_dir = TempDir::new().unwrap();
  let config_dir = TempDir::new().unwrap();

  cargo_bin_cmd!("gitlog")
    .env("NO_COLOR", "1")
    .env("GITLOG_CONFIG", config_dir.path().join("config.toml"))
    .arg("-C")
    .arg(temp_dir.path().join("non-existent-dir"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("non-existent-dir"));
}

#[test]
fn warns_when_repository_has_no_remote_branches() -> Result<()> {
  let guard = GitRepoTestGuard::with_initial_commit();
  create_branch(&guard.repo, "feature/local-only", None)?;
  let config_dir = TempDir::new()?;

  cargo_bin_cmd!("gitlog")
    .env("NO_COLOR", "1")
    .env("GITLOG_CONFIG", config_dir.path().join("config.toml"))
    .current_dir(guard.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("No branches found"));

  Ok(())
}

#[test]
fn rejects_malformed_config_file() -> Result<()> {
  let guard = GitRepoTestGuard::with_initial_commit();
  let config_dir = TempDir::new()?;
  let config_path = config_dir.path().join("config.toml");
  std::fs::write(&config_path, "include_merges = \"often\"\n")?;

  cargo_bin_cmd!("gitlog")
    .env("NO_COLOR", "1")
    .env("GITLOG_CONFIG", &config_path)
    .current_dir(guard.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to parse config"));

  Ok(())
}
