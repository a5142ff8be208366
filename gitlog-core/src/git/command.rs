//! # Git Process Runner
//!
//! Spawns the git executable and collects its output. Every invocation is
//! fully awaited before returning. Anything git prints on stderr counts as a
//! failure, whatever the exit code says.

use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use tracing::{debug, trace};

use crate::consts;
use crate::error::GitlogError;

/// A single git invocation rooted in a working directory.
#[derive(Debug, Clone)]
pub struct GitCommand {
  program: OsString,
  args: Vec<OsString>,
  working_directory: PathBuf,
}

/// Why a git invocation did not produce usable output.
#[derive(Debug)]
pub(crate) enum RunError {
  /// The executable could not be spawned at all.
  Unavailable(String),
  /// Git (or the OS, for a missing directory) reported a diagnostic.
  Diagnostic(String),
  /// Copying stdout into the caller's sink failed.
  Sink(io::Error),
}

impl RunError {
  /// Convert into a [`GitlogError`], wrapping diagnostics with `kind`.
  pub(crate) fn into_gitlog(self, kind: fn(String) -> GitlogError) -> GitlogError {
    match self {
      RunError::Unavailable(message) => GitlogError::ToolUnavailable(message),
      RunError::Diagnostic(message) => kind(message),
      RunError::Sink(err) => GitlogError::Io(err),
    }
  }
}

impl GitCommand {
  /// Create a git invocation that runs inside `working_directory`.
  ///
  /// An empty path means "the current process directory".
  pub fn new(working_directory: impl AsRef<Path>) -> Self {
    Self::with_program(consts::GIT_EXECUTABLE, working_directory)
  }

  /// Create an invocation of an explicit executable path.
  pub fn with_program(program: impl Into<OsString>, working_directory: impl AsRef<Path>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      working_directory: working_directory.as_ref().to_path_buf(),
    }
  }

  /// Append one argument.
  pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
    self.args.push(arg.into());
    self
  }

  /// Append several arguments.
  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  /// Arguments passed after the executable name.
  pub fn arguments(&self) -> &[OsString] {
    &self.args
  }

  /// Run to completion and return raw stdout bytes.
  pub(crate) fn output(&self) -> Result<Vec<u8>, RunError> {
    let output = self
      .command()
      .stdin(Stdio::null())
      .output()
      .map_err(|err| self.spawn_failure(err))?;

    self.check(output.status, &output.stderr)?;
    trace!("git produced {} bytes of output", output.stdout.len());
    Ok(output.stdout)
  }

  /// Run to completion while copying stdout into `sink` as it arrives.
  ///
  /// Whatever reached the sink before a failure stays there.
  pub(crate) fn stream_into(&self, sink: &mut dyn Write) -> Result<(), RunError> {
    let mut child = self
      .command()
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .map_err(|err| self.spawn_failure(err))?;

    // stderr is drained on its own thread so a full pipe cannot stall git
    let stderr = child.stderr.take();
    let stderr_reader = thread::spawn(move || {
      let mut buffer = Vec::new();
      if let Some(mut stderr) = stderr {
        let _ = stderr.read_to_end(&mut buffer);
      }
      buffer
    });

    let copied = match child.stdout.take() {
      Some(mut stdout) => io::copy(&mut stdout, sink),
      None => Ok(0),
    };

    if let Err(err) = copied {
      let _ = child.kill();
      let _ = child.wait();
      let _ = stderr_reader.join();
      return Err(RunError::Sink(err));
    }

    let status = child.wait().map_err(RunError::Sink)?;
    let stderr = stderr_reader.join().unwrap_or_default();
    self.check(status, &stderr)
  }

  fn command(&self) -> Command {
    debug!(
      "Running {} {:?} in {}",
      self.program.to_string_lossy(),
      self.args,
      self.working_directory.display()
    );

    let mut command = Command::new(&self.program);
    command.args(&self.args);
    if !self.working_directory.as_os_str().is_empty() {
      command.current_dir(&self.working_directory);
    }
    command
  }

  fn spawn_failure(&self, err: io::Error) -> RunError {
    let directory = &self.working_directory;
    if !directory.as_os_str().is_empty() && !directory.is_dir() {
      return RunError::Diagnostic(format!("cannot change to '{}': {err}", directory.display()));
    }

    RunError::Unavailable(format!("failed to run {}: {err}", self.program.to_string_lossy()))
  }

  fn check(&self, status: ExitStatus, stderr: &[u8]) -> Result<(), RunError> {
    if !stderr.is_empty() {
      let diagnostic = String::from_utf8_lossy(stderr).into_owned();
      debug!("git reported: {}", diagnostic.trim_end());
      return Err(RunError::Diagnostic(diagnostic));
    }

    if !status.success() {
      return Err(RunError::Diagnostic(format!(
        "{} exited with {status}",
        self.program.to_string_lossy()
      )));
    }

    Ok(())
  }
}

/// Locate the git executable on `PATH`.
pub fn locate_git() -> Result<PathBuf, GitlogError> {
  which::which(consts::GIT_EXECUTABLE)
    .inspect(|path| debug!("Using git at {}", path.display()))
    .map_err(|err| GitlogError::ToolUnavailable(format!("{err}: git")))
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_missing_directory_is_a_diagnostic() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope");

    let err = GitCommand::new(&missing).arg("--version").output().unwrap_err();
    match err {
      RunError::Diagnostic(message) => {
        assert!(message.contains("nope"));
        assert!(message.to_lowercase().contains("no such file or directory"));
      }
      other => panic!("Expected a diagnostic, got {other:?}"),
    }
  }

  #[test]
  fn test_missing_executable_is_unavailable() {
    let temp_dir = TempDir::new().unwrap();

    let err = GitCommand::with_program("gitlog-definitely-not-a-real-binary", temp_dir.path())
      .output()
      .unwrap_err();
    assert!(matches!(err, RunError::Unavailable(_)));
  }

  #[test]
  fn test_output_returns_stdout() {
    let output = GitCommand::new("").arg("--version").output().unwrap();
    assert!(String::from_utf8_lossy(&output).starts_with("git version"));
  }

  #[test]
  fn test_stream_into_writes_stdout_to_sink() {
    let mut sink = Vec::new();
    GitCommand::new("").arg("--version").stream_into(&mut sink).unwrap();
    assert!(String::from_utf8_lossy(&sink).starts_with("git version"));
  }

  #[test]
  fn test_stderr_is_failure() {
    let temp_dir = TempDir::new().unwrap();

    let err = GitCommand::new(temp_dir.path())
      .args(["rev-parse", "--git-dir"])
      .output()
      .unwrap_err();
    match err {
      RunError::Diagnostic(message) => assert!(message.contains("not a git repository")),
      other => panic!("Expected a diagnostic, got {other:?}"),
    }
  }

  #[test]
  fn test_into_gitlog_maps_variants() {
    let err = RunError::Diagnostic("fatal: boom\n".to_string()).into_gitlog(GitlogError::ListFailure);
    assert!(matches!(err, GitlogError::ListFailure(ref message) if message == "fatal: boom\n"));

    let err = RunError::Unavailable("gone".to_string()).into_gitlog(GitlogError::CompareFailure);
    assert!(matches!(err, GitlogError::ToolUnavailable(_)));
  }

  #[test]
  fn test_locate_git_finds_executable() {
    let path = locate_git().unwrap();
    assert!(path.ends_with(consts::GIT_EXECUTABLE));
  }
}
