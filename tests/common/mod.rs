//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::PathBuf;

use quill::clipboard::MemoryClipboard;
use quill::config::EditorConfig;
use quill::editable::Position;
use quill::fonts::FontCatalog;
use quill::messages::Msg;
use quill::model::AppModel;
use quill::update::update;
use quill::Cmd;

/// Font families the test catalog offers, in sorted order
pub const TEST_FAMILIES: &[&str] = &["Arial", "DejaVuSans", "Georgia", "LiberationMono"];

/// A catalog built from paths that never need to exist
pub fn test_fonts() -> FontCatalog {
    FontCatalog::from_files(
        TEST_FAMILIES
            .iter()
            .map(|family| PathBuf::from(format!("/usr/share/fonts/test/{}.ttf", family))),
    )
}

/// Create a test model holding `text` with the cursor at the end
pub fn test_model(text: &str) -> AppModel {
    test_model_with_clipboard(text, MemoryClipboard::default())
}

pub fn test_model_with_clipboard(text: &str, clipboard: MemoryClipboard) -> AppModel {
    let mut model = AppModel::new(
        EditorConfig::default(),
        test_fonts(),
        Box::new(clipboard),
        (800, 600),
        1.0,
    );
    model.document.replace_all(text);
    model.document.navigate(|e| e.move_document_end(false));
    model.ensure_cursor_visible();
    model
}

/// Select the characters in `[start, end)` of the first line
pub fn select_columns(model: &mut AppModel, start: usize, end: usize) {
    model.document.navigate(|e| {
        e.set_cursor(Position::new(0, start), false);
        e.set_cursor(Position::new(0, end), true);
    });
}

/// Put the cursor on the first line without selecting anything
pub fn place_cursor(model: &mut AppModel, column: usize) {
    model
        .document
        .navigate(|e| e.set_cursor(Position::new(0, column), false));
}

/// Run one message through `update`
pub fn send(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    update(model, msg)
}

pub fn buffer_to_string(model: &AppModel) -> String {
    model.document.text()
}
