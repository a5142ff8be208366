//! Git plumbing: listing branches and comparing two of them.
//!
//! Everything here shells out to the git executable rather than reading the
//! object database directly.

pub mod branches;
pub mod command;
pub mod compare;

pub use branches::{
  BranchCandidateSet, BranchName, BranchScope, RawBranchOutput, list_branches, list_command, normalize, normalize_str,
};
pub use command::{GitCommand, locate_git};
pub use compare::{
  ComparisonRequest, ComparisonRequestBuilder, MergePolicy, RevisionRange, compare, compare_to_string, log_command,
};
