//! Keybinding: a keystroke and what it triggers

use crate::commands::CommandId;
use crate::messages::{DocumentMsg, EditorMsg, Msg};

use super::types::Keystroke;

/// What a bound keystroke does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCommand {
    /// A registered command, shared with menus and the toolbar
    Command(CommandId),
    /// Cursor movement and selection
    Editor(EditorMsg),
    /// Text editing keys
    Document(DocumentMsg),
}

impl KeyCommand {
    pub fn to_msg(&self) -> Msg {
        match self {
            KeyCommand::Command(id) => id.to_msg(),
            KeyCommand::Editor(msg) => Msg::Editor(msg.clone()),
            KeyCommand::Document(msg) => Msg::Document(msg.clone()),
        }
    }
}

/// A single keybinding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    pub command: KeyCommand,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, command: KeyCommand) -> Self {
        Self { keystroke, command }
    }

    pub fn command(keystroke: Keystroke, id: CommandId) -> Self {
        Self::new(keystroke, KeyCommand::Command(id))
    }

    pub fn editor(keystroke: Keystroke, msg: EditorMsg) -> Self {
        Self::new(keystroke, KeyCommand::Editor(msg))
    }

    pub fn document(keystroke: Keystroke, msg: DocumentMsg) -> Self {
        Self::new(keystroke, KeyCommand::Document(msg))
    }

    pub fn display_string(&self) -> String {
        self.keystroke.display_string()
    }
}
