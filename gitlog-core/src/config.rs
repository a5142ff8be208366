//! # Configuration Management
//!
//! Optional user defaults read from `config.toml` in the XDG config
//! directory. Command-line flags always win over values from the file.

use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::consts;
use crate::git::{BranchScope, MergePolicy};

/// Defaults loaded from the config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitlogConfig {
  /// Pretty-format template passed to `git log --format`.
  pub format: Option<String>,
  /// Whether merge commits are listed.
  pub include_merges: Option<bool>,
  /// Whether local branches are offered next to remote-tracking ones.
  pub include_local: Option<bool>,
  /// Whether the result is copied to the clipboard.
  pub copy_to_clipboard: Option<bool>,
}

impl GitlogConfig {
  /// Load from the default location, or return defaults when no file exists.
  pub fn load() -> Result<Self> {
    match config_path() {
      Some(path) => Self::load_from(&path),
      None => Ok(Self::default()),
    }
  }

  /// Load from an explicit path. A missing file yields defaults.
  pub fn load_from(path: &Path) -> Result<Self> {
    if !path.exists() {
      tracing::debug!("No config file at {}", path.display());
      return Ok(Self::default());
    }

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: GitlogConfig =
      toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))?;

    tracing::debug!("Loaded config from {}: {:?}", path.display(), config);
    Ok(config)
  }

  /// Merge command-line overrides over the file values and built-in defaults.
  pub fn resolve(&self, overrides: &Overrides) -> Settings {
    let include_merges = overrides.include_merges.or(self.include_merges).unwrap_or(false);
    let include_local = overrides.include_local.or(self.include_local).unwrap_or(false);

    Settings {
      format: overrides
        .format
        .clone()
        .or_else(|| self.format.clone())
        .unwrap_or_else(|| consts::DEFAULT_LOG_FORMAT.to_string()),
      merges: MergePolicy::from_include(include_merges),
      scope: BranchScope::from_remote_only(!include_local),
      copy_to_clipboard: overrides.copy_to_clipboard.or(self.copy_to_clipboard).unwrap_or(true),
    }
  }
}

/// Values given explicitly on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
  pub format: Option<String>,
  pub include_merges: Option<bool>,
  pub include_local: Option<bool>,
  pub copy_to_clipboard: Option<bool>,
}

/// Fully resolved settings for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub format: String,
  pub merges: MergePolicy,
  pub scope: BranchScope,
  pub copy_to_clipboard: bool,
}

impl Default for Settings {
  fn default() -> Self {
    GitlogConfig::default().resolve(&Overrides::default())
  }
}

/// Where the config file lives: `$GITLOG_CONFIG` if set, otherwise
/// `<config dir>/config.toml`. `None` when no home directory can be found.
pub fn config_path() -> Option<PathBuf> {
  if let Some(path) = env::var_os(consts::ENV_GITLOG_CONFIG) {
    return Some(PathBuf::from(path));
  }

  ProjectDirs::from("", "", "gitlog").map(|dirs| dirs.config_dir().join("config.toml"))
}
