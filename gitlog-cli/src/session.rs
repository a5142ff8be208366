//! # Comparison Session
//!
//! One pass through the tool: list branches, ask for a base and a compare
//! branch, run the comparison, then show and optionally copy the result.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use gitlog_core::output::format_branch;
use gitlog_core::{
  BranchFilter, ComparisonRequest, GitlogError, Settings, compare_to_string, list_branches, locate_git, normalize,
  print_error, print_info, print_success, print_warning,
};
use tracing::info;

use crate::delivery::{Clipboard, write_to_terminal};
use crate::picker::BranchSelector;

/// How a session ended when it did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// The comparison ran and was written out.
  Delivered { copied: bool },
  /// Git listed no branches for the chosen scope.
  NoCandidates,
  /// The user backed out of a selection.
  Cancelled,
  /// Git rejected the comparison; the diagnostic was shown to the user.
  CompareFailed(String),
}

/// Settings and repository location for one run.
#[derive(Debug, Clone)]
pub struct Session {
  settings: Settings,
  working_directory: PathBuf,
}

impl Session {
  pub fn new(settings: Settings, working_directory: impl Into<PathBuf>) -> Self {
    Self {
      settings,
      working_directory: working_directory.into(),
    }
  }

  /// Run the session.
  ///
  /// A missing git executable or a failed branch listing is returned as an
  /// error before the user is asked anything. A failed comparison is
  /// reported and ends the session normally. A clipboard failure is returned
  /// as an error after the output has been written.
  pub fn run(
    &self,
    selector: &mut dyn BranchSelector,
    clipboard: &mut dyn Clipboard,
    out: &mut dyn Write,
  ) -> Result<Outcome> {
    locate_git()?;

    let raw = list_branches(self.settings.scope, &self.working_directory)?;
    let candidates = normalize(&raw);
    info!("Found {} branch candidates", candidates.len());

    if candidates.is_empty() {
      print_warning("No branches found. Use --local to include local branches.");
      return Ok(Outcome::NoCandidates);
    }

    let mut filter = BranchFilter::new(candidates);

    let Some(base) = selector.select("Select base branch", &mut filter)? else {
      print_warning("Selection cancelled");
      return Ok(Outcome::Cancelled);
    };
    let Some(compare) = selector.select("Select compare branch", &mut filter)? else {
      print_warning("Selection cancelled");
      return Ok(Outcome::Cancelled);
    };

    print_info(&format!(
      "Commits on {} that are not on {}",
      format_branch(compare.as_str()),
      format_branch(base.as_str())
    ));

    let request = ComparisonRequest::builder(base, compare)
      .merges(self.settings.merges)
      .format(self.settings.format.clone())
      .working_directory(self.working_directory.clone())
      .build();

    let text = match compare_to_string(&request) {
      Ok(text) => text,
      Err(GitlogError::CompareFailure(diagnostic)) => {
        print_error(diagnostic.trim_end());
        return Ok(Outcome::CompareFailed(diagnostic));
      }
      Err(err) => return Err(err.into()),
    };

    write_to_terminal(out, &text)?;

    if !self.settings.copy_to_clipboard {
      return Ok(Outcome::Delivered { copied: false });
    }

    clipboard.copy(&text)?;
    print_success("Copied to clipboard!");
    Ok(Outcome::Delivered { copied: true })
  }
}
