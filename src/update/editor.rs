//! Editor update functions for cursor movement, selection, and viewport scrolling.

use crate::commands::Cmd;
use crate::editable::{EditableState, Position, TextBuffer};
use crate::messages::{Direction, EditorMsg};
use crate::model::AppModel;

/// Handle editor messages (cursor movement, viewport scrolling)
pub fn update_editor(model: &mut AppModel, msg: EditorMsg) -> Option<Cmd> {
    match msg {
        EditorMsg::Scroll(lines) => {
            let before = model.editor.viewport.top_line;
            model.editor.scroll_by(lines as isize, &model.document);
            return (model.editor.viewport.top_line != before).then_some(Cmd::Redraw);
        }

        EditorMsg::EndMouseSelection => {
            model.ui.mouse_selecting = false;
            return None;
        }

        EditorMsg::PageUp => page_by(model, -1),
        EditorMsg::PageDown => page_by(model, 1),

        EditorMsg::SetCursorPosition { line, column } => {
            model.ui.mouse_selecting = true;
            model
                .document
                .navigate(|e| e.set_cursor(Position::new(line, column), false));
        }

        EditorMsg::ExtendSelectionToPosition { line, column } => {
            model
                .document
                .navigate(|e| e.set_cursor(Position::new(line, column), true));
        }

        EditorMsg::SelectWordAt { line, column } => {
            model.ui.mouse_selecting = false;
            model.document.navigate(|e| {
                e.set_cursor(Position::new(line, column), false);
                e.select_word();
            });
        }

        other => {
            model.document.navigate(|e| apply_movement(e, &other));
        }
    }

    model.ensure_cursor_visible();
    model.ui.reset_cursor_blink();
    Some(Cmd::Redraw)
}

/// Move the cursor and the view by `pages` screenfuls
fn page_by(model: &mut AppModel, pages: isize) {
    let page = model
        .editor
        .visible_lines(&model.document, &model.metrics)
        .max(1) as isize;
    let delta = page * pages;
    model.document.navigate(|e| e.move_vertically(delta, false));
    model.editor.scroll_by(delta, &model.document);
}

/// Keyboard movement; `extend` variants grow the selection
fn apply_movement<B: TextBuffer>(e: &mut EditableState<B>, msg: &EditorMsg) {
    match *msg {
        EditorMsg::MoveCursor(direction) => move_in(e, direction, false),
        EditorMsg::MoveCursorWithSelection(direction) => move_in(e, direction, true),
        EditorMsg::MoveCursorWord(Direction::Left) => e.move_word_left(false),
        EditorMsg::MoveCursorWord(Direction::Right) => e.move_word_right(false),
        EditorMsg::MoveCursorWord(direction) => move_in(e, direction, false),
        EditorMsg::MoveCursorWordWithSelection(Direction::Left) => e.move_word_left(true),
        EditorMsg::MoveCursorWordWithSelection(Direction::Right) => e.move_word_right(true),
        EditorMsg::MoveCursorWordWithSelection(direction) => move_in(e, direction, true),
        EditorMsg::MoveCursorLineStart => e.move_line_start(false),
        EditorMsg::MoveCursorLineEnd => e.move_line_end(false),
        EditorMsg::MoveCursorLineStartWithSelection => e.move_line_start(true),
        EditorMsg::MoveCursorLineEndWithSelection => e.move_line_end(true),
        EditorMsg::MoveCursorDocumentStart => e.move_document_start(false),
        EditorMsg::MoveCursorDocumentEnd => e.move_document_end(false),
        EditorMsg::MoveCursorDocumentStartWithSelection => e.move_document_start(true),
        EditorMsg::MoveCursorDocumentEndWithSelection => e.move_document_end(true),
        EditorMsg::SelectAll => e.select_all(),
        // Handled by update_editor
        EditorMsg::PageUp
        | EditorMsg::PageDown
        | EditorMsg::SetCursorPosition { .. }
        | EditorMsg::ExtendSelectionToPosition { .. }
        | EditorMsg::SelectWordAt { .. }
        | EditorMsg::EndMouseSelection
        | EditorMsg::Scroll(_) => {}
    }
}

fn move_in<B: TextBuffer>(e: &mut EditableState<B>, direction: Direction, extend: bool) {
    match direction {
        Direction::Up => e.move_up(extend),
        Direction::Down => e.move_down(extend),
        Direction::Left => e.move_left(extend),
        Direction::Right => e.move_right(extend),
    }
}
