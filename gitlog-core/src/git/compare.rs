//! # Branch Comparison
//!
//! Runs `git log base..compare` and hands the formatted lines to a sink. The
//! format template is passed to git untouched; its placeholders are git's.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::branches::BranchName;
use super::command::GitCommand;
use crate::consts;
use crate::error::{GitlogError, Result};

/// Whether merge commits appear in the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
  /// Leave merge commits out (`--no-merges`).
  #[default]
  Exclude,
  /// Keep merge commits.
  Include,
}

impl MergePolicy {
  /// Map the "include merges" toggle onto a policy.
  pub const fn from_include(include_merges: bool) -> Self {
    if include_merges { MergePolicy::Include } else { MergePolicy::Exclude }
  }
}

/// Commits reachable from `compare` but not from `base`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
  base: BranchName,
  compare: BranchName,
}

impl RevisionRange {
  /// Build the range; `base` is the excluded side.
  pub fn new(base: BranchName, compare: BranchName) -> Self {
    Self { base, compare }
  }

  /// The excluded (older) side.
  pub fn base(&self) -> &BranchName {
    &self.base
  }

  /// The included (newer) side.
  pub fn compare(&self) -> &BranchName {
    &self.compare
  }
}

impl fmt::Display for RevisionRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}..{}", self.base, self.compare)
  }
}

/// Everything needed to run one comparison. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
  range: RevisionRange,
  merges: MergePolicy,
  format: String,
  working_directory: PathBuf,
}

impl ComparisonRequest {
  /// Start building a request comparing `compare` against `base`.
  pub fn builder(base: BranchName, compare: BranchName) -> ComparisonRequestBuilder {
    ComparisonRequestBuilder {
      range: RevisionRange::new(base, compare),
      merges: MergePolicy::default(),
      format: consts::DEFAULT_LOG_FORMAT.to_string(),
      working_directory: PathBuf::from("."),
    }
  }

  pub fn range(&self) -> &RevisionRange {
    &self.range
  }

  pub fn merges(&self) -> MergePolicy {
    self.merges
  }

  pub fn format(&self) -> &str {
    &self.format
  }

  pub fn working_directory(&self) -> &Path {
    &self.working_directory
  }
}

/// Builder for [`ComparisonRequest`].
#[derive(Debug, Clone)]
pub struct ComparisonRequestBuilder {
  range: RevisionRange,
  merges: MergePolicy,
  format: String,
  working_directory: PathBuf,
}

impl ComparisonRequestBuilder {
  /// Choose whether merge commits are listed.
  pub fn merges(mut self, merges: MergePolicy) -> Self {
    self.merges = merges;
    self
  }

  /// Set the git pretty-format template.
  pub fn format(mut self, format: impl Into<String>) -> Self {
    self.format = format.into();
    self
  }

  /// Set the directory git runs in.
  pub fn working_directory(mut self, working_directory: impl Into<PathBuf>) -> Self {
    self.working_directory = working_directory.into();
    self
  }

  pub fn build(self) -> ComparisonRequest {
    ComparisonRequest {
      range: self.range,
      merges: self.merges,
      format: self.format,
      working_directory: self.working_directory,
    }
  }
}

/// Build the `git log` invocation for `request`.
pub fn log_command(request: &ComparisonRequest) -> GitCommand {
  let command = GitCommand::new(request.working_directory()).args([
    "--no-pager".to_string(),
    "log".to_string(),
    format!("--format={}", request.format()),
    request.range().to_string(),
  ]);

  match request.merges() {
    MergePolicy::Exclude => command.arg("--no-merges"),
    MergePolicy::Include => command,
  }
}

/// Stream the commits in `request`'s range into `sink`.
///
/// Git's diagnostic text is returned unchanged as
/// [`GitlogError::CompareFailure`]. Output already written to the sink is not
/// rolled back, and flushing the sink is left to the caller.
pub fn compare(request: &ComparisonRequest, sink: &mut dyn Write) -> Result<()> {
  info!("Comparing {}", request.range());
  log_command(request)
    .stream_into(sink)
    .map_err(|err| err.into_gitlog(GitlogError::CompareFailure))
}

/// Run the comparison and collect the output as text.
pub fn compare_to_string(request: &ComparisonRequest) -> Result<String> {
  let mut buffer = Vec::new();
  compare(request, &mut buffer)?;
  debug!("Comparison produced {} bytes", buffer.len());
  Ok(String::from_utf8_lossy(&buffer).into_owned())
}
