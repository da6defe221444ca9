//! Clipboard access
//!
//! The update loop talks to the clipboard through [`ClipboardProvider`] so
//! tests can swap the system clipboard for an in-memory one.

use std::fmt::Debug;

pub trait ClipboardProvider: Debug {
    /// Current clipboard text, `None` if empty or unavailable
    fn get_text(&mut self) -> Option<String>;

    /// Replace the clipboard text; returns whether it succeeded
    fn set_text(&mut self, text: &str) -> bool;
}

/// The operating system clipboard, opened per access
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardProvider for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => clipboard.get_text().ok(),
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {}", e);
                None
            }
        }
    }

    fn set_text(&mut self, text: &str) -> bool {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => match clipboard.set_text(text.to_owned()) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Failed to write clipboard: {}", e);
                    false
                }
            },
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {}", e);
                false
            }
        }
    }
}

/// Process-local clipboard
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl MemoryClipboard {
    pub fn with_text(text: &str) -> Self {
        Self {
            contents: Some(text.to_string()),
        }
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.contents.clone()
    }

    fn set_text(&mut self, text: &str) -> bool {
        self.contents = Some(text.to_string());
        true
    }
}
