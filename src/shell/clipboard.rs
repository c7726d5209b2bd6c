//! Clipboard access for the shell

use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write failed: {0}")]
    Write(#[from] std::io::Error),
}

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Writes the OSC 52 escape sequence so the terminal sets its clipboard
pub struct Osc52Clipboard<W> {
    out: parking_lot::Mutex<W>,
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: parking_lot::Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

/// Encode `text` as an OSC 52 clipboard sequence
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut out = self.out.lock();
        out.write_all(osc52_sequence(text).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Clipboard for environments without one
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(
            "no clipboard is available in this environment".to_string(),
        ))
    }
}
