//! Logging setup and cursor diagnostics
//!
//! Configure console output via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=quill::update=debug` - module-level filtering
//!
//! Logs are also written to `~/.config/quill/logs/quill.log` with daily
//! rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::document::Document;

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "quill.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Cursor, selection and length of a document at one moment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSnapshot {
    pub cursor: (usize, usize),
    pub anchor: (usize, usize),
    pub selection_empty: bool,
    pub char_count: usize,
}

impl CursorSnapshot {
    pub fn from_document(document: &Document) -> Self {
        let cursor = document.cursor();
        let selection = document.selection();
        Self {
            cursor: (cursor.line, cursor.column),
            anchor: (selection.anchor.line, selection.anchor.column),
            selection_empty: selection.is_empty(),
            char_count: document.char_count(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &CursorSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.cursor != other.cursor {
            changes.push(format!(
                "cursor ({},{}) → ({},{})",
                self.cursor.0, self.cursor.1, other.cursor.0, other.cursor.1
            ));
        }
        if self.selection_empty != other.selection_empty {
            let status = if other.selection_empty {
                "cleared"
            } else {
                "active"
            };
            changes.push(format!("selection {}", status));
        }
        if self.char_count != other.char_count {
            changes.push(format!("chars {} → {}", self.char_count, other.char_count));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_reports_movement_and_length() {
        let mut doc = Document::with_text("abc");
        let before = CursorSnapshot::from_document(&doc);
        assert_eq!(before.diff(&before), None);

        doc.navigate(|e| e.move_document_end(false));
        doc.type_char('d');
        let after = CursorSnapshot::from_document(&doc);
        let diff = before.diff(&after).unwrap_or_default();
        assert!(diff.contains("cursor (0,0) → (0,4)"));
        assert!(diff.contains("chars 3 → 4"));
    }
}
