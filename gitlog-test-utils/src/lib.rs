//! Test utilities shared across the gitlog workspace
//!
//! Provides throwaway git repositories ([`GitRepoTestGuard`]) plus helpers
//! for building the branch layouts the comparison tests need.
//!
//! The dead_code lint is disabled because not every test crate uses every
//! helper.

#![allow(dead_code)]

pub mod git;

// Re-export commonly used items
pub use git::{
  GitRepoTestGuard, checkout_branch, create_branch, create_commit, create_merge_commit, create_remote_tracking_ref,
  current_branch_name,
};
