//! Command types for the Elm-style architecture
//!
//! [`CommandId`] and [`COMMANDS`] form the dispatch table that menu items,
//! toolbar buttons and key bindings resolve through. [`Cmd`] values are the
//! side effects `update` asks the runtime to perform.

use std::path::PathBuf;

use crate::messages::{AppMsg, DocumentMsg, EditorMsg, FormatMsg, ModalMsg, Msg, UiMsg};

// ============================================================================
// Command Registry
// ============================================================================

/// A user-invokable command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    // File
    New,
    Open,
    Save,
    Close,

    // Clipboard
    Cut,
    Copy,
    Paste,

    // Formatting
    SelectFont,
    SelectColor,
    SetBold,
    SetItalic,
    ToggleBold,
    ToggleItalic,

    // Editing
    Undo,
    Redo,
    SelectAll,
}

/// Where a command is offered in the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// An item in the "File" menu
    FileMenu,
    /// A toolbar button
    Toolbar,
    /// Reachable only through key bindings, or not at all
    Hidden,
}

/// A row of the dispatch table
#[derive(Debug, Clone)]
pub struct CommandDef {
    pub id: CommandId,
    pub label: &'static str,
    pub placement: Placement,
}

/// Static registry of all commands, in menu/toolbar order
pub static COMMANDS: &[CommandDef] = &[
    CommandDef {
        id: CommandId::New,
        label: "New",
        placement: Placement::FileMenu,
    },
    CommandDef {
        id: CommandId::Open,
        label: "Open",
        placement: Placement::FileMenu,
    },
    CommandDef {
        id: CommandId::Save,
        label: "Save",
        placement: Placement::FileMenu,
    },
    CommandDef {
        id: CommandId::Close,
        label: "Close",
        placement: Placement::FileMenu,
    },
    CommandDef {
        id: CommandId::Cut,
        label: "Cut",
        placement: Placement::Toolbar,
    },
    CommandDef {
        id: CommandId::Copy,
        label: "Copy",
        placement: Placement::Toolbar,
    },
    CommandDef {
        id: CommandId::Paste,
        label: "Paste",
        placement: Placement::Toolbar,
    },
    CommandDef {
        id: CommandId::SelectFont,
        label: "Font",
        placement: Placement::Toolbar,
    },
    CommandDef {
        id: CommandId::SetBold,
        label: "Bold",
        placement: Placement::Toolbar,
    },
    CommandDef {
        id: CommandId::SetItalic,
        label: "Italic",
        placement: Placement::Toolbar,
    },
    // Keyboard-only, or not reachable from the window at all
    CommandDef {
        id: CommandId::SelectColor,
        label: "Color",
        placement: Placement::Hidden,
    },
    CommandDef {
        id: CommandId::ToggleBold,
        label: "Toggle Bold",
        placement: Placement::Hidden,
    },
    CommandDef {
        id: CommandId::ToggleItalic,
        label: "Toggle Italic",
        placement: Placement::Hidden,
    },
    CommandDef {
        id: CommandId::Undo,
        label: "Undo",
        placement: Placement::Hidden,
    },
    CommandDef {
        id: CommandId::Redo,
        label: "Redo",
        placement: Placement::Hidden,
    },
    CommandDef {
        id: CommandId::SelectAll,
        label: "Select All",
        placement: Placement::Hidden,
    },
];

impl CommandId {
    /// The registry entry for this command
    pub fn def(self) -> &'static CommandDef {
        COMMANDS
            .iter()
            .find(|def| def.id == self)
            .unwrap_or(&COMMANDS[0])
    }

    pub fn label(self) -> &'static str {
        self.def().label
    }

    /// Commands of the "File" menu, top to bottom
    pub fn file_menu() -> impl Iterator<Item = CommandId> {
        Self::placed(Placement::FileMenu)
    }

    /// Toolbar buttons, left to right (the size dropdown follows them)
    pub fn toolbar() -> impl Iterator<Item = CommandId> {
        Self::placed(Placement::Toolbar)
    }

    fn placed(placement: Placement) -> impl Iterator<Item = CommandId> {
        COMMANDS
            .iter()
            .filter(move |def| def.placement == placement)
            .map(|def| def.id)
    }

    /// The message that carries out this command
    pub fn to_msg(self) -> Msg {
        match self {
            CommandId::New => Msg::App(AppMsg::NewFile),
            CommandId::Open => Msg::App(AppMsg::OpenFileDialog),
            CommandId::Save => Msg::App(AppMsg::SaveFileDialog),
            CommandId::Close => Msg::App(AppMsg::Quit),
            CommandId::Cut => Msg::Document(DocumentMsg::Cut),
            CommandId::Copy => Msg::Document(DocumentMsg::Copy),
            CommandId::Paste => Msg::Document(DocumentMsg::Paste),
            CommandId::SelectFont => Msg::Ui(UiMsg::Modal(ModalMsg::OpenFontPicker)),
            CommandId::SelectColor => Msg::Ui(UiMsg::Modal(ModalMsg::OpenColorPicker)),
            CommandId::SetBold => Msg::Format(FormatMsg::SetBold),
            CommandId::SetItalic => Msg::Format(FormatMsg::SetItalic),
            CommandId::ToggleBold => Msg::Format(FormatMsg::ToggleBold),
            CommandId::ToggleItalic => Msg::Format(FormatMsg::ToggleItalic),
            CommandId::Undo => Msg::Document(DocumentMsg::Undo),
            CommandId::Redo => Msg::Document(DocumentMsg::Redo),
            CommandId::SelectAll => Msg::Editor(EditorMsg::SelectAll),
        }
    }
}

// ============================================================================
// Side-Effect Commands (returned from update)
// ============================================================================

/// Side effects requested by `update`, performed by the runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    Redraw,
    /// Ask "Discard unsaved changes?"; answers with `AppMsg::DiscardConfirmed`
    ConfirmDiscard,
    /// Native open dialog filtered to `*.txt`; answers with `OpenFileDialogResult`
    ShowOpenFileDialog,
    /// Native save dialog filtered to `*.txt`; answers with `SaveFileDialogResult`
    ShowSaveFileDialog,
    /// Read a file; answers with `AppMsg::FileLoaded`
    LoadFile { path: PathBuf },
    /// Write a file; answers with `AppMsg::SaveCompleted`
    SaveFile { path: PathBuf, content: String },
    /// Modal error dialog
    ShowError { title: String, message: String },
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_is_registered_once() {
        let all = [
            CommandId::New,
            CommandId::Open,
            CommandId::Save,
            CommandId::Close,
            CommandId::Cut,
            CommandId::Copy,
            CommandId::Paste,
            CommandId::SelectFont,
            CommandId::SelectColor,
            CommandId::SetBold,
            CommandId::SetItalic,
            CommandId::ToggleBold,
            CommandId::ToggleItalic,
            CommandId::Undo,
            CommandId::Redo,
            CommandId::SelectAll,
        ];
        for id in all {
            assert_eq!(COMMANDS.iter().filter(|def| def.id == id).count(), 1, "{id:?}");
            assert_eq!(id.def().id, id);
        }
        assert_eq!(COMMANDS.len(), all.len());
    }

    #[test]
    fn test_file_menu_order() {
        let labels: Vec<_> = CommandId::file_menu().map(CommandId::label).collect();
        assert_eq!(labels, vec!["New", "Open", "Save", "Close"]);
    }

    #[test]
    fn test_toolbar_order() {
        let labels: Vec<_> = CommandId::toolbar().map(CommandId::label).collect();
        assert_eq!(
            labels,
            vec!["Cut", "Copy", "Paste", "Font", "Bold", "Italic"]
        );
    }

    #[test]
    fn test_color_is_hidden() {
        assert_eq!(CommandId::SelectColor.def().placement, Placement::Hidden);
    }

    #[test]
    fn test_toolbar_bold_sets_rather_than_toggles() {
        assert_eq!(CommandId::SetBold.to_msg(), Msg::Format(FormatMsg::SetBold));
        assert_eq!(
            CommandId::ToggleBold.to_msg(),
            Msg::Format(FormatMsg::ToggleBold)
        );
    }

    #[test]
    fn test_close_quits_without_prompt() {
        assert_eq!(CommandId::Close.to_msg(), Msg::App(AppMsg::Quit));
    }
}
