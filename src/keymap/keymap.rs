//! Keymap lookup and key handling inside popups

use std::collections::HashMap;

use crate::commands::CommandId;
use crate::messages::{Direction, ModalMsg};
use crate::model::ui::ModalId;

use super::binding::{KeyCommand, Keybinding};
use super::types::{KeyCode, Keystroke};

/// Keystroke to command lookup
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    /// Index into `bindings`; the first binding for a keystroke wins
    lookup: HashMap<Keystroke, usize>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::with_bindings(super::default_bindings())
    }
}

impl Keymap {
    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut lookup = HashMap::new();
        for (idx, binding) in bindings.iter().enumerate() {
            lookup.entry(binding.keystroke).or_insert(idx);
        }
        Self { bindings, lookup }
    }

    pub fn lookup(&self, keystroke: &Keystroke) -> Option<&KeyCommand> {
        self.lookup
            .get(keystroke)
            .map(|&idx| &self.bindings[idx].command)
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// Key hint for a command (first binding), e.g. "Ctrl+S"
    pub fn display_for(&self, id: CommandId) -> Option<String> {
        self.bindings
            .iter()
            .find(|b| b.command == KeyCommand::Command(id))
            .map(Keybinding::display_string)
    }
}

/// Map a keystroke while a popup is open
///
/// Printable characters for the font picker filter are handled by the
/// caller, which knows the typed text.
pub fn modal_msg(modal: ModalId, keystroke: &Keystroke) -> Option<ModalMsg> {
    let mods = keystroke.mods;
    match keystroke.key {
        KeyCode::Escape => Some(ModalMsg::Close),
        KeyCode::Enter => Some(ModalMsg::Confirm),
        KeyCode::Up => Some(ModalMsg::Navigate(Direction::Up)),
        KeyCode::Down => Some(ModalMsg::Navigate(Direction::Down)),
        KeyCode::Left | KeyCode::Right => {
            let (direction, step) = if keystroke.key == KeyCode::Left {
                (Direction::Left, -1)
            } else {
                (Direction::Right, 1)
            };
            match modal {
                ModalId::FontPicker => Some(ModalMsg::AdjustSize(step)),
                ModalId::ColorPicker => Some(ModalMsg::Navigate(direction)),
                ModalId::FileMenu | ModalId::SizeDropdown => None,
            }
        }
        KeyCode::Backspace if modal == ModalId::FontPicker => Some(ModalMsg::DeleteBackward),
        KeyCode::Char('b') if modal == ModalId::FontPicker && mods.is_shortcut() => {
            Some(ModalMsg::ToggleBold)
        }
        KeyCode::Char('i') if modal == ModalId::FontPicker && mods.is_shortcut() => {
            Some(ModalMsg::ToggleItalic)
        }
        _ => None,
    }
}
