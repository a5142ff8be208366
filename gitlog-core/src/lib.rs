//! # Gitlog Core Library
//!
//! Branch listing, candidate filtering and branch comparison for gitlog. The
//! git executable does the actual work; this crate builds its invocations,
//! cleans its output and reports its diagnostics verbatim.

pub mod config;
pub mod consts;
pub mod error;
pub mod filter;
pub mod git;
pub mod output;

pub use config::{GitlogConfig, Overrides, Settings};
pub use error::{GitlogError, Result};
pub use filter::BranchFilter;
pub use git::{
  BranchCandidateSet, BranchName, BranchScope, ComparisonRequest, MergePolicy, RawBranchOutput, compare,
  compare_to_string, list_branches, locate_git, normalize,
};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
