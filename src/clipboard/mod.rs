//! Copying answers out of the chat.

use anyhow::{Context, Result, bail};
use arboard::Clipboard;

use crate::utils::sanitize_for_display;

/// Answers are short; anything past this is a runaway response
const MAX_COPY_BYTES: usize = 1024 * 1024;

/// Destination for copied text (allows mocking in tests)
trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard(Clipboard);

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.0.set_text(text).context("Failed to set clipboard contents")
    }
}

/// Clean up an answer for pasting: control sequences stripped, surrounding blank space trimmed
fn prepare(text: &str) -> Result<String> {
    let cleaned = sanitize_for_display(text);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        bail!("Nothing to copy");
    }
    if cleaned.len() > MAX_COPY_BYTES {
        bail!("Answer too large to copy ({} bytes, max {})", cleaned.len(), MAX_COPY_BYTES);
    }
    Ok(cleaned.to_string())
}

fn copy_with(text: &str, sink: &mut dyn ClipboardSink) -> Result<()> {
    let prepared = prepare(text)?;
    sink.set_text(&prepared)
}

/// Copy an answer to the system clipboard
///
/// # Errors
/// Fails on empty text, oversized text, or when no system clipboard is reachable
/// (headless sessions, missing X11/Wayland).
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    // Validate before touching the clipboard for clearer errors in headless runs
    prepare(text)?;
    let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
    copy_with(text, &mut SystemClipboard(clipboard))
}
