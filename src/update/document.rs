//! Document update functions for text editing, clipboard and undo/redo

use crate::commands::Cmd;
use crate::messages::DocumentMsg;
use crate::model::AppModel;
use crate::util::normalize_line_endings;

/// Handle document messages (text editing, clipboard, undo/redo)
pub fn update_document(model: &mut AppModel, msg: DocumentMsg) -> Option<Cmd> {
    let changed = match msg {
        DocumentMsg::InsertChar(ch) => model.document.type_char(ch),
        DocumentMsg::InsertNewline => model.document.type_char('\n'),
        DocumentMsg::DeleteBackward => model.document.delete_backward(),
        DocumentMsg::DeleteForward => model.document.delete_forward(),
        DocumentMsg::Undo => model.document.undo(),
        DocumentMsg::Redo => model.document.redo(),

        DocumentMsg::Copy => {
            copy_selection(model);
            return None;
        }

        DocumentMsg::Cut => copy_selection(model) && model.document.delete_selection(),

        DocumentMsg::Paste => match model.clipboard.get_text() {
            Some(text) if !text.is_empty() => {
                model.document.insert_text(&normalize_line_endings(&text))
            }
            _ => {
                tracing::debug!("Nothing to paste");
                false
            }
        },
    };

    if !changed {
        return None;
    }
    model.ensure_cursor_visible();
    model.ui.reset_cursor_blink();
    Some(Cmd::Redraw)
}

/// Put the selected text on the clipboard; false if nothing was copied
fn copy_selection(model: &mut AppModel) -> bool {
    if !model.document.has_selection() {
        return false;
    }
    let text = model.document.selected_text();
    let copied = model.clipboard.set_text(&text);
    if copied {
        tracing::debug!("Copied {} chars", text.chars().count());
    }
    copied
}
