// src/clipboard.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Failed to access clipboard: {0}")]
    Unavailable(String),

    #[error("Failed to copy to clipboard: {0}")]
    CopyFailed(String),
}

#[cfg_attr(test, mockall::automock)]
pub trait Clipboard: Send + Sync {
    fn copy_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard. A fresh handle is opened per copy so nothing
/// platform-specific has to cross threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::CopyFailed(e.to_string()))
    }
}
