//! Git repository fixtures for testing
//!
//! Creates temporary repositories with git2 so tests can run the real git
//! executable against a known branch layout.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use git2::{BranchType, Repository, Signature};
use tempfile::TempDir;

/// A temporary git repository that is deleted when the guard is dropped.
pub struct GitRepoTestGuard {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
}

impl GitRepoTestGuard {
  /// Create an empty repository with a test identity configured.
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let repo = Repository::init(temp_dir.path()).expect("Failed to initialize git repository");

    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "Gitlog Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "gitlog-test@example.com")
      .expect("Failed to set user.email");

    assert!(
      temp_dir.path().join(".git").exists(),
      "Git repository was not properly initialized"
    );

    Self { temp_dir, repo }
  }

  /// Create a repository holding one initial commit.
  pub fn with_initial_commit() -> Self {
    let guard = Self::new();
    create_commit(&guard.repo, "README.md", "hello\n", "initial commit").expect("Failed to create initial commit");
    guard
  }

  /// Get the path to the git repository
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

/// Write `content` to `file_name` and commit it on the current branch.
pub fn create_commit(repo: &Repository, file_name: &str, content: &str, message: &str) -> Result<()> {
  let workdir = repo.workdir().context("Repository has no working directory")?;
  fs::write(workdir.join(file_name), content)?;

  let mut index = repo.index()?;
  index.add_path(Path::new(file_name))?;
  index.write()?;

  let tree_id = index.write_tree()?;
  let tree = repo.find_tree(tree_id)?;
  let signature = Signature::now("Test User", "test@example.com")?;

  match repo.head().ok().and_then(|head| head.peel_to_commit().ok()) {
    Some(parent) => repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[&parent])?,
    None => repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[])?,
  };

  Ok(())
}

/// Record a merge of `other_branch` into the current branch.
///
/// The current tree is kept as-is, so the result is a two-parent commit
/// without any conflict handling.
pub fn create_merge_commit(repo: &Repository, other_branch: &str, message: &str) -> Result<()> {
  let head = repo.head()?.peel_to_commit()?;
  let other = repo
    .find_branch(other_branch, BranchType::Local)?
    .into_reference()
    .peel_to_commit()?;
  let tree = head.tree()?;
  let signature = Signature::now("Test User", "test@example.com")?;

  repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[&head, &other])?;
  Ok(())
}

/// Helper function to create a branch in a repository
pub fn create_branch(repo: &Repository, branch_name: &str, start_point: Option<&str>) -> Result<()> {
  let head = if let Some(start) = start_point {
    repo
      .find_branch(start, BranchType::Local)?
      .into_reference()
      .peel_to_commit()?
  } else {
    repo.head()?.peel_to_commit()?
  };

  repo.branch(branch_name, &head, false)?;
  Ok(())
}

/// Helper function to checkout a branch
pub fn checkout_branch(repo: &Repository, branch_name: &str) -> Result<()> {
  let obj = repo
    .revparse_single(&format!("refs/heads/{branch_name}"))?
    .peel_to_commit()?;

  repo.checkout_tree(&obj.into_object(), None)?;
  repo.set_head(&format!("refs/heads/{branch_name}"))?;

  Ok(())
}

/// Name of the checked-out branch (e.g. `main` or `master`, depending on the
/// user's `init.defaultBranch`).
pub fn current_branch_name(repo: &Repository) -> Result<String> {
  let head = repo.head()?;
  head
    .shorthand()
    .map(str::to_string)
    .context("HEAD is not a named branch")
}

/// Point `refs/remotes/<remote>/<branch>` at the tip of a local branch,
/// simulating a fetched remote without any network access.
///
/// When `set_head` is true, `refs/remotes/<remote>/HEAD` is made a symbolic
/// ref to it, which `git branch -r` shows as `<remote>/HEAD -> <remote>/<branch>`.
pub fn create_remote_tracking_ref(repo: &Repository, remote: &str, local_branch: &str, set_head: bool) -> Result<()> {
  let tip = repo
    .find_branch(local_branch, BranchType::Local)?
    .into_reference()
    .peel_to_commit()?;
  let target = format!("refs/remotes/{remote}/{local_branch}");
  repo.reference(&target, tip.id(), true, "gitlog test remote")?;

  if set_head {
    repo.reference_symbolic(
      &format!("refs/remotes/{remote}/HEAD"),
      &target,
      true,
      "gitlog test remote head",
    )?;
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_creates_git_repo() {
    let git_repo = GitRepoTestGuard::new();
    assert!(git_repo.path().join(".git").exists());
  }

  #[test]
  fn test_merge_commit_has_two_parents() {
    let guard = GitRepoTestGuard::with_initial_commit();
    let main = current_branch_name(&guard.repo).unwrap();

    create_branch(&guard.repo, "topic", None).unwrap();
    checkout_branch(&guard.repo, "topic").unwrap();
    create_commit(&guard.repo, "topic.txt", "topic\n", "topic work").unwrap();
    checkout_branch(&guard.repo, &main).unwrap();
    create_merge_commit(&guard.repo, "topic", "Merge topic").unwrap();

    let head = guard.repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.parent_count(), 2);
    assert_eq!(head.summary(), Some("Merge topic"));
  }

  #[test]
  fn test_remote_tracking_ref_with_head() {
    let guard = GitRepoTestGuard::with_initial_commit();
    let main = current_branch_name(&guard.repo).unwrap();

    create_remote_tracking_ref(&guard.repo, "origin", &main, true).unwrap();

    let head = guard.repo.find_reference("refs/remotes/origin/HEAD").unwrap();
    assert_eq!(
      head.symbolic_target(),
      Some(format!("refs/remotes/origin/{main}").as_str())
    );
  }
}
