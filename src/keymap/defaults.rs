//! Default keybindings

use crate::commands::CommandId;
use crate::messages::{Direction, DocumentMsg, EditorMsg};

use super::binding::Keybinding;
use super::types::{KeyCode, Keystroke, Modifiers};

fn cmd(c: char) -> Keystroke {
    Keystroke::char_with_mods(c, Modifiers::cmd())
}

fn cmd_shift(c: char) -> Keystroke {
    Keystroke::char_with_mods(c, Modifiers::cmd() | Modifiers::SHIFT)
}

fn key(code: KeyCode) -> Keystroke {
    Keystroke::key(code)
}

fn with(code: KeyCode, mods: Modifiers) -> Keystroke {
    Keystroke::new(code, mods)
}

/// The built-in bindings, in menu hint priority order
pub fn default_bindings() -> Vec<Keybinding> {
    let shift = Modifiers::SHIFT;
    let word = Modifiers::word();
    let doc = Modifiers::cmd();

    let mut bindings = vec![
        // File
        Keybinding::command(cmd('n'), CommandId::New),
        Keybinding::command(cmd('o'), CommandId::Open),
        Keybinding::command(cmd('s'), CommandId::Save),
        // Clipboard
        Keybinding::command(cmd('x'), CommandId::Cut),
        Keybinding::command(cmd('c'), CommandId::Copy),
        Keybinding::command(cmd('v'), CommandId::Paste),
        // Formatting
        Keybinding::command(cmd('b'), CommandId::ToggleBold),
        Keybinding::command(cmd('i'), CommandId::ToggleItalic),
        // Editing
        Keybinding::command(cmd('z'), CommandId::Undo),
        Keybinding::command(cmd_shift('z'), CommandId::Redo),
        Keybinding::command(cmd('a'), CommandId::SelectAll),
        Keybinding::document(key(KeyCode::Enter), DocumentMsg::InsertNewline),
        Keybinding::document(with(KeyCode::Enter, shift), DocumentMsg::InsertNewline),
        Keybinding::document(key(KeyCode::Tab), DocumentMsg::InsertChar('\t')),
        Keybinding::document(key(KeyCode::Backspace), DocumentMsg::DeleteBackward),
        Keybinding::document(with(KeyCode::Backspace, shift), DocumentMsg::DeleteBackward),
        Keybinding::document(key(KeyCode::Delete), DocumentMsg::DeleteForward),
        // Navigation
        Keybinding::editor(key(KeyCode::PageUp), EditorMsg::PageUp),
        Keybinding::editor(key(KeyCode::PageDown), EditorMsg::PageDown),
        Keybinding::editor(key(KeyCode::Home), EditorMsg::MoveCursorLineStart),
        Keybinding::editor(key(KeyCode::End), EditorMsg::MoveCursorLineEnd),
        Keybinding::editor(
            with(KeyCode::Home, shift),
            EditorMsg::MoveCursorLineStartWithSelection,
        ),
        Keybinding::editor(
            with(KeyCode::End, shift),
            EditorMsg::MoveCursorLineEndWithSelection,
        ),
        Keybinding::editor(with(KeyCode::Home, doc), EditorMsg::MoveCursorDocumentStart),
        Keybinding::editor(with(KeyCode::End, doc), EditorMsg::MoveCursorDocumentEnd),
        Keybinding::editor(
            with(KeyCode::Home, doc | shift),
            EditorMsg::MoveCursorDocumentStartWithSelection,
        ),
        Keybinding::editor(
            with(KeyCode::End, doc | shift),
            EditorMsg::MoveCursorDocumentEndWithSelection,
        ),
    ];

    for (code, direction) in [
        (KeyCode::Up, Direction::Up),
        (KeyCode::Down, Direction::Down),
        (KeyCode::Left, Direction::Left),
        (KeyCode::Right, Direction::Right),
    ] {
        bindings.push(Keybinding::editor(key(code), EditorMsg::MoveCursor(direction)));
        bindings.push(Keybinding::editor(
            with(code, shift),
            EditorMsg::MoveCursorWithSelection(direction),
        ));
    }

    for (code, direction) in [(KeyCode::Left, Direction::Left), (KeyCode::Right, Direction::Right)] {
        bindings.push(Keybinding::editor(
            with(code, word),
            EditorMsg::MoveCursorWord(direction),
        ));
        bindings.push(Keybinding::editor(
            with(code, word | shift),
            EditorMsg::MoveCursorWordWithSelection(direction),
        ));
    }

    if cfg!(target_os = "macos") {
        // Cmd+arrows jump to line and document edges
        bindings.extend([
            Keybinding::editor(with(KeyCode::Left, doc), EditorMsg::MoveCursorLineStart),
            Keybinding::editor(with(KeyCode::Right, doc), EditorMsg::MoveCursorLineEnd),
            Keybinding::editor(with(KeyCode::Up, doc), EditorMsg::MoveCursorDocumentStart),
            Keybinding::editor(with(KeyCode::Down, doc), EditorMsg::MoveCursorDocumentEnd),
            Keybinding::editor(
                with(KeyCode::Left, doc | shift),
                EditorMsg::MoveCursorLineStartWithSelection,
            ),
            Keybinding::editor(
                with(KeyCode::Right, doc | shift),
                EditorMsg::MoveCursorLineEndWithSelection,
            ),
            Keybinding::editor(
                with(KeyCode::Up, doc | shift),
                EditorMsg::MoveCursorDocumentStartWithSelection,
            ),
            Keybinding::editor(
                with(KeyCode::Down, doc | shift),
                EditorMsg::MoveCursorDocumentEndWithSelection,
            ),
        ]);
    } else {
        bindings.push(Keybinding::command(
            Keystroke::char_with_mods('y', Modifiers::CTRL),
            CommandId::Redo,
        ));
    }

    bindings
}
