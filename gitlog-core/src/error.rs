//! # Errors
//!
//! Error values produced by the core operations. Failures reported by the git
//! executable carry its diagnostic text untouched so users see git's own
//! phrasing.

use std::io;

use thiserror::Error;

/// Errors produced while listing or comparing branches.
#[derive(Debug, Error)]
pub enum GitlogError {
  /// The git executable could not be located or spawned.
  #[error("{0}")]
  ToolUnavailable(String),
  /// Branch enumeration failed.
  #[error("{0}")]
  ListFailure(String),
  /// The log query between two branches failed.
  #[error("{0}")]
  CompareFailure(String),
  /// Writing comparison output to the sink failed.
  #[error(transparent)]
  Io(#[from] io::Error),
}

/// Result alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, GitlogError>;
