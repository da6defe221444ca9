//! UI message handlers (timers, pointer, popups)

use std::time::Instant;

use crate::commands::Cmd;
use crate::messages::{Direction, FormatMsg, ModalMsg, Msg, UiMsg};
use crate::model::{
    AppModel, ColorPickerState, FileMenuState, FontPickerState, ModalId, ModalState,
    PopupTarget, SizeDropdownState,
};
use crate::theme::PALETTE_COLUMNS;

/// Handle UI messages (timers, pointer tracking, popups)
pub fn update_ui(model: &mut AppModel, msg: UiMsg) -> Option<Cmd> {
    match msg {
        UiMsg::Tick => {
            let now = Instant::now();
            let blinked = model.ui.update_cursor_blink(now);
            let expired = model.ui.expire_transient_message(now);
            (blinked || expired).then_some(Cmd::Redraw)
        }

        UiMsg::PointerMoved { x, y } => {
            let before = hover_target(model);
            model.ui.pointer = Some((x, y));
            (hover_target(model) != before).then_some(Cmd::Redraw)
        }

        UiMsg::PointerLeft => {
            model.ui.pointer = None;
            Some(Cmd::Redraw)
        }

        UiMsg::Modal(modal_msg) => update_modal(model, modal_msg),
    }
}

/// What the pointer is over, for hover highlighting
#[derive(Debug, PartialEq)]
enum Hover {
    Nothing,
    Chrome(crate::model::ChromeTarget),
    Popup(PopupTarget),
}

fn hover_target(model: &AppModel) -> Hover {
    let Some((x, y)) = model.ui.pointer else {
        return Hover::Nothing;
    };
    if let Some(popup) = model.popup_layout() {
        return popup.hit_test(x, y).map_or(Hover::Nothing, Hover::Popup);
    }
    model
        .chrome_layout()
        .hit_test(x, y)
        .map_or(Hover::Nothing, Hover::Chrome)
}

/// Open `state`, or close it if a popup of the same kind is already open
fn toggle_modal(model: &mut AppModel, state: ModalState) {
    if model.ui.modal_id() == Some(state.id()) {
        model.ui.close_modal();
    } else {
        model.ui.open_modal(state);
    }
}

fn update_modal(model: &mut AppModel, msg: ModalMsg) -> Option<Cmd> {
    match msg {
        ModalMsg::OpenFileMenu => {
            toggle_modal(model, ModalState::FileMenu(FileMenuState::default()));
        }

        ModalMsg::OpenSizeDropdown => {
            let size = model.current_style().size;
            toggle_modal(model, ModalState::SizeDropdown(SizeDropdownState::new(size)));
        }

        ModalMsg::OpenFontPicker => {
            let families = model.fonts.families();
            if families.is_empty() {
                tracing::warn!("No fonts available for the font picker");
            }
            let default_family = model.default_family().unwrap_or_default().to_string();
            let picker = FontPickerState::new(families, &model.current_style(), &default_family);
            model.ui.open_modal(ModalState::FontPicker(picker));
        }

        ModalMsg::OpenColorPicker => {
            let picker = ColorPickerState::new(model.current_style().color);
            model.ui.open_modal(ModalState::ColorPicker(picker));
        }

        ModalMsg::Close => {
            if !model.ui.has_modal() {
                return None;
            }
            model.ui.close_modal();
        }

        ModalMsg::Navigate(direction) => {
            let modal = model.ui.active_modal.as_mut()?;
            let step: isize = match (modal.id(), direction) {
                (ModalId::ColorPicker, Direction::Up) => -(PALETTE_COLUMNS as isize),
                (ModalId::ColorPicker, Direction::Down) => PALETTE_COLUMNS as isize,
                (_, Direction::Up) | (ModalId::ColorPicker, Direction::Left) => -1,
                (_, Direction::Down) | (ModalId::ColorPicker, Direction::Right) => 1,
                _ => return None,
            };
            let target = modal.selected_index().saturating_add_signed(step);
            modal.set_selected_index(target);
        }

        ModalMsg::SelectIndex(index) => {
            model.ui.active_modal.as_mut()?.set_selected_index(index);
        }

        ModalMsg::InsertChar(ch) => {
            let picker = font_picker(model)?;
            picker.filter.insert_char(ch);
            picker.selected_index = 0;
        }

        ModalMsg::DeleteBackward => {
            let picker = font_picker(model)?;
            picker.filter.delete_backward()?;
            picker.selected_index = 0;
        }

        ModalMsg::AdjustSize(delta) => {
            let picker = font_picker(model)?;
            picker.size = picker.size.step(delta);
        }

        ModalMsg::ToggleBold => {
            let picker = font_picker(model)?;
            picker.bold = !picker.bold;
        }

        ModalMsg::ToggleItalic => {
            let picker = font_picker(model)?;
            picker.italic = !picker.italic;
        }

        ModalMsg::Confirm => return confirm_modal(model),

        ModalMsg::Activate(target) => return activate(model, target),
    }

    Some(Cmd::Redraw)
}

fn font_picker(model: &mut AppModel) -> Option<&mut FontPickerState> {
    match model.ui.active_modal.as_mut()? {
        ModalState::FontPicker(picker) => Some(picker),
        _ => None,
    }
}

/// Close the popup and carry out its selection
fn confirm_modal(model: &mut AppModel) -> Option<Cmd> {
    let modal = model.ui.active_modal.take()?;
    let msg = match modal {
        ModalState::FileMenu(menu) => menu.selected_command().map(|id| id.to_msg()),
        ModalState::SizeDropdown(dropdown) => dropdown
            .selected_size()
            .map(|size| Msg::Format(FormatMsg::SetFontSize(size))),
        ModalState::FontPicker(picker) => picker
            .choice()
            .map(|choice| Msg::Format(FormatMsg::ApplyFont(choice))),
        ModalState::ColorPicker(picker) => picker
            .selected_color()
            .map(|color| Msg::Format(FormatMsg::ApplyColor(color))),
    };

    match msg {
        Some(msg) => super::update_inner(model, msg).or(Some(Cmd::Redraw)),
        None => Some(Cmd::Redraw),
    }
}

/// A click inside the open popup
fn activate(model: &mut AppModel, target: PopupTarget) -> Option<Cmd> {
    let modal_id = model.ui.modal_id()?;
    let msg = match target {
        PopupTarget::Item(index) => {
            update_modal(model, ModalMsg::SelectIndex(index));
            match modal_id {
                // Menus act on a single click; pickers wait for OK
                ModalId::FileMenu | ModalId::SizeDropdown => ModalMsg::Confirm,
                ModalId::FontPicker | ModalId::ColorPicker => return Some(Cmd::Redraw),
            }
        }
        PopupTarget::SizeDown => ModalMsg::AdjustSize(-1),
        PopupTarget::SizeUp => ModalMsg::AdjustSize(1),
        PopupTarget::ToggleBold => ModalMsg::ToggleBold,
        PopupTarget::ToggleItalic => ModalMsg::ToggleItalic,
        PopupTarget::Confirm => ModalMsg::Confirm,
        PopupTarget::Cancel => ModalMsg::Close,
    };
    update_modal(model, msg)
}
