//! App message handlers (file operations, window events)

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::{AppModel, TextMetrics};
use crate::util::filename_for_display;

/// Status bar confirmation after a successful save
pub const SAVED_MESSAGE: &str = "File saved successfully.";

/// Handle app messages (file operations, window events)
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Resize(width, height) => {
            model.window_size = (width, height);
            model.relayout();
            Some(Cmd::Redraw)
        }

        AppMsg::ScaleFactorChanged(scale) => {
            // The renderer follows up with measured metrics
            model.metrics = TextMetrics::with_scale(scale);
            model.relayout();
            Some(Cmd::Redraw)
        }

        AppMsg::MetricsChanged(metrics) => {
            model.metrics = metrics;
            model.relayout();
            Some(Cmd::Redraw)
        }

        AppMsg::NewFile => {
            model.ui.close_modal();
            if model.document.is_empty() {
                clear_document(model);
                Some(Cmd::Redraw)
            } else {
                Some(Cmd::ConfirmDiscard)
            }
        }

        AppMsg::DiscardConfirmed(true) => {
            clear_document(model);
            Some(Cmd::Redraw)
        }

        AppMsg::DiscardConfirmed(false) => None,

        AppMsg::OpenFileDialog => {
            model.ui.close_modal();
            Some(Cmd::ShowOpenFileDialog)
        }

        AppMsg::OpenFileDialogResult { path: None } => None,

        AppMsg::OpenFileDialogResult { path: Some(path) } => Some(Cmd::LoadFile { path }),

        AppMsg::FileLoaded { path, result } => match result {
            Ok(content) => {
                tracing::info!(
                    "Opened {} ({} chars)",
                    path.display(),
                    content.chars().count()
                );
                model.document.replace_all(&content);
                model.editor.reset_scroll();
                model.ensure_cursor_visible();
                model.ui.reset_cursor_blink();
                Some(Cmd::Redraw)
            }
            Err(e) => {
                tracing::warn!("Failed to open {}: {:?}", path.display(), e);
                Some(Cmd::ShowError {
                    title: "Open failed".to_string(),
                    message: e.user_message(&filename_for_display(&path)),
                })
            }
        },

        AppMsg::SaveFileDialog => {
            model.ui.close_modal();
            Some(Cmd::ShowSaveFileDialog)
        }

        AppMsg::SaveFileDialogResult { path: None } => None,

        AppMsg::SaveFileDialogResult { path: Some(path) } => Some(Cmd::SaveFile {
            path,
            content: model.document.text(),
        }),

        AppMsg::SaveCompleted { path, result } => match result {
            Ok(()) => {
                tracing::info!("Saved {}", path.display());
                let duration = model.config.status_message_duration();
                model.ui.set_transient_message(SAVED_MESSAGE, duration);
                Some(Cmd::Redraw)
            }
            Err(e) => {
                tracing::warn!("Failed to save {}: {:?}", path.display(), e);
                Some(Cmd::ShowError {
                    title: "Save failed".to_string(),
                    message: e.user_message(&filename_for_display(&path)),
                })
            }
        },

        AppMsg::Quit => Some(Cmd::Quit),
    }
}

fn clear_document(model: &mut AppModel) {
    model.document.clear();
    model.editor.reset_scroll();
    model.ui.reset_cursor_blink();
}
