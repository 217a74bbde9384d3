//! Clipboard access for the URL field's paste button.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Source of clipboard text.
pub trait ClipboardRead {
    fn read_text(&mut self) -> Result<String, ClipboardError>;
}

/// The desktop clipboard, opened lazily on first read.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardRead for SystemClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        if self.inner.is_none() {
            let cb = arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?;
            self.inner = Some(cb);
        }
        match self.inner.as_mut() {
            Some(cb) => cb.get_text().map_err(|e| ClipboardError(e.to_string())),
            None => Err(ClipboardError("not initialised".into())),
        }
    }
}
