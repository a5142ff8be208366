//! # Branch Filtering
//!
//! Fuzzy ranking of branch candidates against what the user has typed so
//! far. The candidate list is captured once when the filter is built and
//! re-ranked on every keystroke without going back to git.

use nucleo::pattern::{CaseMatching, Normalization, Pattern};
use nucleo::{Config, Matcher};

use crate::git::{BranchCandidateSet, BranchName};

/// Ranks a fixed candidate set against typed input.
pub struct BranchFilter {
  candidates: BranchCandidateSet,
  matcher: Matcher,
}

impl BranchFilter {
  /// Capture `candidates` for the lifetime of the filter.
  pub fn new(candidates: BranchCandidateSet) -> Self {
    Self {
      candidates,
      matcher: Matcher::new(Config::DEFAULT),
    }
  }

  /// All candidates in listing order.
  pub fn candidates(&self) -> &BranchCandidateSet {
    &self.candidates
  }

  /// Candidates matching the last word of `query`, best match first.
  ///
  /// A blank query returns every candidate in listing order. Equal scores
  /// keep listing order.
  pub fn suggest(&mut self, query: &str) -> Vec<BranchName> {
    let word = word_before_cursor(query);
    if word.is_empty() {
      return self.candidates.names().to_vec();
    }

    let pattern = Pattern::parse(word, CaseMatching::Smart, Normalization::Smart);
    pattern
      .match_list(self.candidates.iter(), &mut self.matcher)
      .into_iter()
      .map(|(name, _score)| name.clone())
      .collect()
  }
}

fn word_before_cursor(query: &str) -> &str {
  if query.ends_with(char::is_whitespace) {
    return "";
  }
  query.split_whitespace().next_back().unwrap_or("")
}
