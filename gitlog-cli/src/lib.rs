//! # Gitlog CLI Library
//!
//! Command-line surface, interactive branch picker and output delivery for
//! the gitlog tool.

pub mod cli;
pub mod delivery;
pub mod picker;
pub mod session;

use std::io;

use anyhow::Result;
use gitlog_core::GitlogConfig;

use crate::cli::Cli;
use crate::delivery::SystemClipboard;
use crate::picker::TerminalPicker;
use crate::session::{Outcome, Session};

/// Run gitlog with parsed arguments against the real terminal and clipboard.
pub fn handle_cli(cli: Cli) -> Result<Outcome> {
  cli.colors.apply();

  let config = GitlogConfig::load()?;
  let settings = config.resolve(&cli.overrides());
  tracing::debug!("Resolved settings: {:?}", settings);

  let session = Session::new(settings, cli.directory);
  let stdout = io::stdout();
  session.run(&mut TerminalPicker, &mut SystemClipboard, &mut stdout.lock())
}
