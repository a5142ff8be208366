//! # Output Delivery
//!
//! Post-processing steps for a finished comparison: writing it to the
//! terminal and copying it to the system clipboard.

use std::io::{self, Write};

use anyhow::{Context, Result};

/// Destination for copied text.
pub trait Clipboard {
  fn copy(&mut self, text: &str) -> Result<()>;
}

/// The operating system clipboard, via arboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
  fn copy(&mut self, text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Failed to access the clipboard")?;
    clipboard
      .set_text(text.to_owned())
      .context("Failed to copy to the clipboard")?;
    tracing::debug!("Copied {} bytes to the clipboard", text.len());
    Ok(())
  }
}

/// Write the comparison text unchanged and flush.
pub fn write_to_terminal(out: &mut dyn Write, text: &str) -> io::Result<()> {
  out.write_all(text.as_bytes())?;
  out.flush()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_write_to_terminal_is_verbatim() {
    let mut out = Vec::new();
    write_to_terminal(&mut out, "abc123 Added content (Test User <test@example.com>)\n").unwrap();

    assert_eq!(
      String::from_utf8(out).unwrap(),
      "abc123 Added content (Test User <test@example.com>)\n"
    );
  }
}
