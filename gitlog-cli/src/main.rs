//! # Gitlog CLI Entry Point
//!
//! Parses arguments, sets up tracing and hands off to the session.

use anyhow::Result;
use clap::Parser;
use gitlog_cli::cli::Cli;
use gitlog_cli::handle_cli;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
  let cmd = Cli::parse();

  // Logs go to stderr so stdout only carries the comparison
  let level = cmd.log_level();
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  let outcome = handle_cli(cmd)?;
  debug!("Session finished: {:?}", outcome);
  Ok(())
}
