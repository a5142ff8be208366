//! # Command Line Interface
//!
//! Flag definitions for the `gitlog` binary and their mapping onto config
//! overrides.

use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser};
use gitlog_core::{ColorMode, Overrides};

/// Top-level CLI command for gitlog
#[derive(Parser, Debug)]
#[command(name = "gitlog")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Pick two branches and show the commits between them")]
#[command(
  long_about = "Pick a base branch and a compare branch with a fuzzy finder, then print every\n\
        commit reachable from the compare branch but not from the base branch.\n\n\
        The result is printed using a git pretty-format template and, unless\n\
        --no-copy is given, copied to the clipboard.\n\n\
        Defaults can be set in config.toml inside the gitlog config directory\n\
        (or the file named by GITLOG_CONFIG)."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Include merge commits
  #[arg(short = 'm', long = "merges")]
  pub merges: bool,

  /// Include local branches (remote-tracking branches are always listed)
  #[arg(short = 'l', long = "local")]
  pub local: bool,

  /// Format of the git log output
  #[arg(
    short = 'f',
    long = "format",
    value_name = "TEMPLATE",
    long_help = "Format of the git log output, passed to `git log --format`.\n\n\
             Defaults to \"%h %s (%cn <%ce>)\"."
  )]
  pub format: Option<String>,

  /// Copy the result to the clipboard (default)
  #[arg(short = 'c', long = "copy", overrides_with = "no_copy")]
  pub copy: bool,

  /// Do not copy the result to the clipboard
  #[arg(long = "no-copy", overrides_with = "copy")]
  pub no_copy: bool,

  /// Repository directory to run in
  #[arg(short = 'C', long = "directory", value_name = "DIR", default_value = ".")]
  pub directory: PathBuf,

  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,
}

impl Cli {
  /// Only flags the user actually passed override the config file.
  pub fn overrides(&self) -> Overrides {
    let copy_to_clipboard = if self.no_copy {
      Some(false)
    } else if self.copy {
      Some(true)
    } else {
      None
    };

    Overrides {
      format: self.format.clone(),
      include_merges: self.merges.then_some(true),
      include_local: self.local.then_some(true),
      copy_to_clipboard,
    }
  }

  /// Tracing level for the `-v` count.
  pub fn log_level(&self) -> tracing::Level {
    match self.verbose {
      0 => tracing::Level::WARN,  // Default: warnings and errors
      1 => tracing::Level::INFO,  // -v: info, warnings, and errors
      2 => tracing::Level::DEBUG, // -vv: debug, info, warnings, and errors
      _ => tracing::Level::TRACE, // -vvv or more: trace and everything else
    }
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;
  use test_case::test_case;

  use super::*;

  fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("gitlog").chain(args.iter().copied())).unwrap()
  }

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_no_flags_means_no_overrides() {
    let cli = parse(&[]);

    assert_eq!(cli.overrides(), Overrides::default());
    assert_eq!(cli.directory, PathBuf::from("."));
  }

  #[test]
  fn test_short_flags() {
    let cli = parse(&["-m", "-l", "-f", "%H", "-C", "/tmp/repo"]);
    let overrides = cli.overrides();

    assert_eq!(overrides.include_merges, Some(true));
    assert_eq!(overrides.include_local, Some(true));
    assert_eq!(overrides.format.as_deref(), Some("%H"));
    assert_eq!(cli.directory, PathBuf::from("/tmp/repo"));
  }

  #[test_case(&["--copy"], Some(true) ; "copy")]
  #[test_case(&["--no-copy"], Some(false) ; "no copy")]
  #[test_case(&["--copy", "--no-copy"], Some(false) ; "last one wins no copy")]
  #[test_case(&["--no-copy", "-c"], Some(true) ; "last one wins copy")]
  fn test_copy_flags(args: &[&str], expected: Option<bool>) {
    assert_eq!(parse(args).overrides().copy_to_clipboard, expected);
  }

  #[test_case(0, tracing::Level::WARN ; "default")]
  #[test_case(1, tracing::Level::INFO ; "info")]
  #[test_case(2, tracing::Level::DEBUG ; "debug")]
  #[test_case(5, tracing::Level::TRACE ; "trace")]
  fn test_log_level(verbose: u8, expected: tracing::Level) {
    let mut cli = parse(&[]);
    cli.verbose = verbose;
    assert_eq!(cli.log_level(), expected);
  }
}
