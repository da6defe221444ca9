//! Character formatting handlers

use crate::commands::Cmd;
use crate::messages::FormatMsg;
use crate::model::{AppModel, CharFormat};

/// Merge formatting into the selection, or the insertion point if none
pub fn update_format(model: &mut AppModel, msg: FormatMsg) -> Option<Cmd> {
    let format = match msg {
        FormatMsg::SetBold => CharFormat::bold(true),
        FormatMsg::SetItalic => CharFormat::italic(true),
        FormatMsg::ToggleBold => CharFormat::bold(!model.document.current_style().bold),
        FormatMsg::ToggleItalic => CharFormat::italic(!model.document.current_style().italic),
        FormatMsg::SetFontSize(size) => CharFormat::size(size),
        FormatMsg::ApplyFont(choice) => CharFormat::font(&choice),
        FormatMsg::ApplyColor(color) => CharFormat::color(color),
    };

    tracing::debug!(
        "Formatting {:?} with {:?}",
        model.document.selection_range(),
        format
    );
    model.document.merge_format(&format);
    // Size changes alter line heights
    model.ensure_cursor_visible();
    Some(Cmd::Redraw)
}
