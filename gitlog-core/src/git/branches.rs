//! # Branch Listing
//!
//! Enumerates branches with `git branch` and cleans the listing into plain
//! branch names that can be offered as selection candidates.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::command::GitCommand;
use crate::consts;
use crate::error::{GitlogError, Result};

/// Which branches `git branch` should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchScope {
  /// Remote-tracking branches only (`git branch -r`).
  #[default]
  Remote,
  /// Local and remote-tracking branches (`git branch -a`).
  All,
}

impl BranchScope {
  /// Map the "remote only" toggle onto a scope.
  pub const fn from_remote_only(remote_only: bool) -> Self {
    if remote_only { BranchScope::Remote } else { BranchScope::All }
  }

  const fn flag(self) -> &'static str {
    match self {
      BranchScope::Remote => "-r",
      BranchScope::All => "-a",
    }
  }
}

/// Unprocessed stdout of `git branch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBranchOutput(Vec<u8>);

impl RawBranchOutput {
  /// Wrap bytes produced by git.
  pub fn new(bytes: Vec<u8>) -> Self {
    Self(bytes)
  }

  /// The raw bytes.
  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }

  /// Whether git printed nothing at all.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// A cleaned branch name.
///
/// Never empty, never containing whitespace, never starting with `-` and
/// never carrying the current-branch marker or a symbolic ref alias.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BranchName(Arc<str>);

impl BranchName {
  /// Clean one line of `git branch` output (or user input) into a name.
  ///
  /// Returns `None` when nothing is left after cleaning, when the result is
  /// not a usable branch name (a second `*`, inner whitespace or a leading
  /// `-`, all refused by git) or when the line is a detached-HEAD
  /// placeholder rather than a branch.
  pub fn parse(line: &str) -> Option<Self> {
    let mut name = line.replacen(consts::CURRENT_BRANCH_MARKER, "", 1);

    let trimmed = name.trim_start();
    if let Some(rest) = trimmed.strip_prefix(consts::WORKTREE_BRANCH_MARKER) {
      name = rest.to_string();
    }

    if let Some((alias, target)) = name.split_once(consts::SYMBOLIC_REF_ARROW)
      && is_head_alias(alias.trim())
    {
      name = target.to_string();
    }

    let name = name.trim();
    if name.is_empty()
      || name.starts_with('-')
      || name.contains(char::is_whitespace)
      || name.contains(consts::CURRENT_BRANCH_MARKER)
      || is_detached_placeholder(name)
    {
      return None;
    }

    Some(Self(Arc::from(name)))
  }

  /// Borrow the name as a `&str`.
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

/// `origin/HEAD` under `-r`, `remotes/origin/HEAD` under `-a`.
fn is_head_alias(alias: &str) -> bool {
  alias == "HEAD" || alias.ends_with("/HEAD")
}

/// `git branch` lists a detached HEAD as `(HEAD detached at abc123)` and an
/// in-progress rebase as `(no branch, rebasing foo)`.
fn is_detached_placeholder(name: &str) -> bool {
  name.starts_with("(HEAD detached") || name.starts_with("(no branch")
}

impl fmt::Debug for BranchName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("BranchName").field(&self.as_str()).finish()
  }
}

impl fmt::Display for BranchName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl AsRef<str> for BranchName {
  fn as_ref(&self) -> &str {
    self.as_str()
  }
}

/// Branch names in the order git listed them.
///
/// Duplicates are kept: a name can legitimately show up twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchCandidateSet(Vec<BranchName>);

impl BranchCandidateSet {
  /// Number of candidates.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Whether there are no candidates.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Iterate over the candidates in listing order.
  pub fn iter(&self) -> std::slice::Iter<'_, BranchName> {
    self.0.iter()
  }

  /// Borrow the candidates as a slice.
  pub fn names(&self) -> &[BranchName] {
    &self.0
  }

  /// Whether a candidate with exactly this name exists.
  pub fn contains(&self, name: &str) -> bool {
    self.0.iter().any(|candidate| candidate.as_str() == name)
  }
}

impl FromIterator<BranchName> for BranchCandidateSet {
  fn from_iter<T: IntoIterator<Item = BranchName>>(iter: T) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl<'a> IntoIterator for &'a BranchCandidateSet {
  type Item = &'a BranchName;
  type IntoIter = std::slice::Iter<'a, BranchName>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

/// Build the `git branch` invocation for `scope`.
pub fn list_command(scope: BranchScope, working_directory: &Path) -> GitCommand {
  GitCommand::new(working_directory).args(["branch", "--no-color", scope.flag()])
}

/// Run `git branch` in `working_directory` and return its stdout verbatim.
///
/// Empty output is a valid result. Anything git writes to stderr is returned
/// as [`GitlogError::ListFailure`] with the text unchanged.
pub fn list_branches(scope: BranchScope, working_directory: &Path) -> Result<RawBranchOutput> {
  let output = list_command(scope, working_directory)
    .output()
    .map_err(|err| err.into_gitlog(GitlogError::ListFailure))?;

  debug!("Listed {} bytes of {:?} branches", output.len(), scope);
  Ok(RawBranchOutput::new(output))
}

/// Clean raw `git branch` output into candidate names.
pub fn normalize(raw: &RawBranchOutput) -> BranchCandidateSet {
  normalize_str(&String::from_utf8_lossy(raw.as_bytes()))
}

/// Clean a `git branch` listing that is already text.
pub fn normalize_str(raw: &str) -> BranchCandidateSet {
  raw.split('\n').filter_map(BranchName::parse).collect()
}

#[cfg(test)]
mod tests {
  use test_case::test_case;

  use super::*;

  #[test_case("  * feature/spaces-and-stars", "feature/spaces-and-stars" ; "marker with padding")]
  #[test_case("* main", "main" ; "current branch")]
  #[test_case("  develop", "develop" ; "plain branch")]
  #[test_case("  origin/HEAD -> origin/main", "origin/main" ; "remote head alias")]
  #[test_case("  remotes/origin/HEAD -> origin/main", "origin/main" ; "all scope head alias")]
  #[test_case("+ feature/other-worktree", "feature/other-worktree" ; "worktree marker")]
  #[test_case("  remotes/upstream/release\r", "remotes/upstream/release" ; "carriage return")]
  #[test_case("  feat->x", "feat->x" ; "arrow inside branch name")]
  #[test_case("  fix/a->b->c", "fix/a->b->c" ; "several arrows inside branch name")]
  fn test_parse_cleans_line(line: &str, expected: &str) {
    assert_eq!(BranchName::parse(line).unwrap().as_str(), expected);
  }

  #[test_case("" ; "empty")]
  #[test_case("   " ; "whitespace")]
  #[test_case("*" ; "bare marker")]
  #[test_case("* (HEAD detached at 1a2b3c4)" ; "detached head")]
  #[test_case("* (no branch, rebasing feature/x)" ; "rebase in progress")]
  #[test_case("--output=/tmp/leak.txt" ; "option lookalike")]
  #[test_case("-x" ; "leading dash")]
  #[test_case("main dev" ; "inner whitespace")]
  #[test_case("  origin/main -> origin/dev" ; "arrow after a non head ref")]
  fn test_parse_rejects_line(line: &str) {
    assert!(BranchName::parse(line).is_none());
  }

  #[test]
  fn test_normalize_empty_input() {
    assert!(normalize_str("").is_empty());
    assert!(normalize_str("\n").is_empty());
    assert!(normalize(&RawBranchOutput::default()).is_empty());
  }

  #[test]
  fn test_normalize_preserves_order_and_duplicates() {
    let raw = "  origin/HEAD -> origin/main\n  origin/main\n  origin/feature/a\n\n";
    let names: Vec<_> = normalize_str(raw).iter().map(|n| n.to_string()).collect();

    assert_eq!(names, vec!["origin/main", "origin/main", "origin/feature/a"]);
  }

  #[test]
  fn test_normalize_never_yields_markers() {
    let raw = "* main\n  remotes/origin/HEAD -> origin/main\n  **\n + \n  -> \n";
    for name in &normalize_str(raw) {
      assert!(!name.as_str().is_empty());
      assert!(!name.as_str().contains('*'));
      assert!(!name.as_str().contains("->"));
      assert!(!name.as_str().contains("HEAD ->"));
      assert_eq!(name.as_str(), name.as_str().trim());
    }
  }

  #[test]
  fn test_candidate_set_contains() {
    let set = normalize_str("* main\n  develop\n");
    assert_eq!(set.len(), 2);
    assert!(set.contains("develop"));
    assert!(!set.contains("dev"));
  }

  #[test]
  fn test_scope_from_remote_only() {
    assert_eq!(BranchScope::from_remote_only(true), BranchScope::Remote);
    assert_eq!(BranchScope::from_remote_only(false), BranchScope::All);
  }

  #[test]
  fn test_list_command_arguments() {
    let command = list_command(BranchScope::All, Path::new("."));
    let args: Vec<_> = command.arguments().iter().map(|a| a.to_string_lossy().into_owned()).collect();
    assert_eq!(args, vec!["branch", "--no-color", "-a"]);
  }
}
