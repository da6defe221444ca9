//! Text editing tests - typing, deletion, clipboard, undo and mouse selection

mod common;

use common::{
    buffer_to_string, place_cursor, select_columns, send, test_model, test_model_with_clipboard,
};
use quill::clipboard::{ClipboardProvider, MemoryClipboard};
use quill::commands::{Cmd, CommandId};
use quill::messages::{DocumentMsg, EditorMsg, Msg};

fn doc(msg: DocumentMsg) -> Msg {
    Msg::Document(msg)
}

// ========================================================================
// Typing and deletion
// ========================================================================

#[test]
fn test_insert_char_at_cursor() {
    let mut model = test_model("hello");
    place_cursor(&mut model, 2);
    let cmd = send(&mut model, doc(DocumentMsg::InsertChar('X')));

    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(buffer_to_string(&model), "heXllo");
    assert_eq!(model.document.cursor().column, 3);
}

#[test]
fn test_typing_replaces_selection() {
    let mut model = test_model("hello world");
    select_columns(&mut model, 0, 5);
    send(&mut model, doc(DocumentMsg::InsertChar('J')));
    assert_eq!(buffer_to_string(&model), "J world");
}

#[test]
fn test_newline_splits_line() {
    let mut model = test_model("ab");
    place_cursor(&mut model, 1);
    send(&mut model, doc(DocumentMsg::InsertNewline));

    assert_eq!(buffer_to_string(&model), "a\nb");
    assert_eq!(model.document.line_count(), 2);
    assert_eq!(model.document.cursor().line, 1);
    assert_eq!(model.document.cursor().column, 0);
}

#[test]
fn test_backspace_at_start_is_noop() {
    let mut model = test_model("abc");
    place_cursor(&mut model, 0);
    let cmd = send(&mut model, doc(DocumentMsg::DeleteBackward));
    assert_eq!(cmd, None);
    assert_eq!(buffer_to_string(&model), "abc");
}

#[test]
fn test_delete_forward_joins_lines() {
    let mut model = test_model("a\nb");
    place_cursor(&mut model, 1);
    send(&mut model, doc(DocumentMsg::DeleteForward));
    assert_eq!(buffer_to_string(&model), "ab");
}

#[test]
fn test_unicode_counts_characters_not_bytes() {
    let mut model = test_model("");
    for ch in "héllo 🎉".chars() {
        send(&mut model, doc(DocumentMsg::InsertChar(ch)));
    }
    assert_eq!(model.document.char_count(), 7);
    assert_eq!(model.document.formats.len(), 7);
}

// ========================================================================
// Undo / redo
// ========================================================================

#[test]
fn test_undo_and_redo_typing() {
    let mut model = test_model("");
    for ch in "abc".chars() {
        send(&mut model, doc(DocumentMsg::InsertChar(ch)));
    }
    send(&mut model, CommandId::Undo.to_msg());
    assert!(buffer_to_string(&model).len() < 3);

    while send(&mut model, CommandId::Undo.to_msg()).is_some() {}
    assert_eq!(buffer_to_string(&model), "");

    while send(&mut model, CommandId::Redo.to_msg()).is_some() {}
    assert_eq!(buffer_to_string(&model), "abc");
}

#[test]
fn test_undo_on_fresh_document_is_noop() {
    let mut model = test_model("loaded");
    assert_eq!(send(&mut model, CommandId::Undo.to_msg()), None);
    assert_eq!(buffer_to_string(&model), "loaded");
}

// ========================================================================
// Clipboard
// ========================================================================

#[test]
fn test_copy_puts_selection_on_clipboard() {
    let mut model = test_model("hello world");
    select_columns(&mut model, 6, 11);
    let cmd = send(&mut model, CommandId::Copy.to_msg());

    assert_eq!(cmd, None);
    assert_eq!(model.clipboard.get_text().as_deref(), Some("world"));
    assert_eq!(buffer_to_string(&model), "hello world");
}

#[test]
fn test_copy_without_selection_leaves_clipboard() {
    let mut model = test_model_with_clipboard("hello", MemoryClipboard::with_text("keep"));
    send(&mut model, CommandId::Copy.to_msg());
    assert_eq!(model.clipboard.get_text().as_deref(), Some("keep"));
}

#[test]
fn test_cut_removes_selection() {
    let mut model = test_model("hello world");
    select_columns(&mut model, 0, 6);
    let cmd = send(&mut model, CommandId::Cut.to_msg());

    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(buffer_to_string(&model), "world");
    assert_eq!(model.clipboard.get_text().as_deref(), Some("hello "));
}

#[test]
fn test_cut_without_selection_is_noop() {
    let mut model = test_model("hello");
    assert_eq!(send(&mut model, CommandId::Cut.to_msg()), None);
    assert_eq!(buffer_to_string(&model), "hello");
}

#[test]
fn test_paste_inserts_at_cursor() {
    let mut model = test_model_with_clipboard("ad", MemoryClipboard::with_text("bc"));
    place_cursor(&mut model, 1);
    send(&mut model, CommandId::Paste.to_msg());

    assert_eq!(buffer_to_string(&model), "abcd");
    assert_eq!(model.document.cursor().column, 3);
}

#[test]
fn test_paste_replaces_selection_and_normalizes_newlines() {
    let mut model = test_model_with_clipboard("xx", MemoryClipboard::with_text("1\r\n2"));
    select_columns(&mut model, 0, 2);
    send(&mut model, CommandId::Paste.to_msg());
    assert_eq!(buffer_to_string(&model), "1\n2");
}

#[test]
fn test_paste_empty_clipboard_is_noop() {
    let mut model = test_model("abc");
    assert_eq!(send(&mut model, CommandId::Paste.to_msg()), None);
    assert_eq!(buffer_to_string(&model), "abc");
}

#[test]
fn test_pasted_text_takes_insertion_style() {
    let mut model = test_model_with_clipboard("ab", MemoryClipboard::with_text("zz"));
    send(&mut model, CommandId::SetBold.to_msg());
    send(&mut model, CommandId::Paste.to_msg());

    assert!(!model.document.style_at(1).unwrap().bold);
    assert!(model.document.style_at(2).unwrap().bold);
    assert!(model.document.style_at(3).unwrap().bold);
}

// ========================================================================
// Mouse
// ========================================================================

#[test]
fn test_click_and_drag_selects() {
    let mut model = test_model("hello world");
    send(
        &mut model,
        Msg::Editor(EditorMsg::SetCursorPosition { line: 0, column: 2 }),
    );
    assert!(model.ui.mouse_selecting);
    send(
        &mut model,
        Msg::Editor(EditorMsg::ExtendSelectionToPosition { line: 0, column: 7 }),
    );
    send(&mut model, Msg::Editor(EditorMsg::EndMouseSelection));

    assert!(!model.ui.mouse_selecting);
    assert_eq!(model.document.selected_text(), "llo w");
}

#[test]
fn test_click_past_line_end_clamps() {
    let mut model = test_model("ab\ncdef");
    send(
        &mut model,
        Msg::Editor(EditorMsg::SetCursorPosition {
            line: 0,
            column: 40,
        }),
    );
    assert_eq!(model.document.cursor().line, 0);
    assert_eq!(model.document.cursor().column, 2);
}

#[test]
fn test_double_click_selects_word() {
    let mut model = test_model("hello brave world");
    send(
        &mut model,
        Msg::Editor(EditorMsg::SelectWordAt { line: 0, column: 8 }),
    );
    assert_eq!(model.document.selected_text(), "brave");
}

#[test]
fn test_select_all() {
    let mut model = test_model("one\ntwo");
    send(&mut model, CommandId::SelectAll.to_msg());
    assert_eq!(model.document.selected_text(), "one\ntwo");
}
