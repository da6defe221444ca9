//! Keyboard input routing
//!
//! Key presses go to the open popup first, then to the keymap, and
//! finally become typed text. Typed text arrives in `KeyEvent::text`,
//! which already accounts for shift state and dead keys.

use winit::event::KeyEvent;
use winit::keyboard::ModifiersState;

use quill::commands::Cmd;
use quill::keymap::{keystroke_from_winit, modal_msg, modifiers_from_winit, Keymap};
use quill::messages::{DocumentMsg, ModalMsg, Msg, UiMsg};
use quill::model::{AppModel, ModalId};
use quill::update::update;

/// Handle a key press
pub fn handle_key(
    model: &mut AppModel,
    keymap: &Keymap,
    event: &KeyEvent,
    modifiers: ModifiersState,
) -> Option<Cmd> {
    let mods = modifiers_from_winit(modifiers);
    let keystroke = keystroke_from_winit(&event.logical_key, mods);

    // Focus capture: an open popup sees every key
    if let Some(modal) = model.ui.modal_id() {
        if let Some(msg) = keystroke.as_ref().and_then(|k| modal_msg(modal, k)) {
            return update(model, Msg::Ui(UiMsg::Modal(msg)));
        }
        if modal != ModalId::FontPicker || mods.is_shortcut() {
            return None;
        }
        return typed_chars(event).fold(None, |cmd, ch| {
            update(model, Msg::Ui(UiMsg::Modal(ModalMsg::InsertChar(ch)))).or(cmd)
        });
    }

    if let Some(command) = keystroke.as_ref().and_then(|k| keymap.lookup(k)) {
        let msg = command.to_msg();
        return update(model, msg);
    }

    if mods.is_shortcut() {
        return None;
    }

    typed_chars(event).fold(None, |cmd, ch| {
        update(model, Msg::Document(DocumentMsg::InsertChar(ch))).or(cmd)
    })
}

/// Printable characters produced by a key event
fn typed_chars(event: &KeyEvent) -> impl Iterator<Item = char> + '_ {
    event
        .text
        .as_deref()
        .unwrap_or_default()
        .chars()
        .filter(|ch| !ch.is_control())
}
