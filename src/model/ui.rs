//! UI state - status bar, cursor blink, popups and pickers

use std::time::{Duration, Instant};

use super::format::{FontChoice, FontSize, TextStyle};
use super::status_bar::{StatusBar, TransientMessage};
use crate::commands::CommandId;
use crate::editable::{EditableState, StringBuffer, TextBuffer};
use crate::theme::{Color, COLOR_PALETTE};

/// Cursor blink half-period
pub const CURSOR_BLINK_INTERVAL: Duration = Duration::from_millis(530);

// ============================================================================
// Popups
// ============================================================================

/// Identifies which popup is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalId {
    FileMenu,
    FontPicker,
    ColorPicker,
    SizeDropdown,
}

/// The open "File" menu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMenuState {
    pub selected_index: usize,
}

impl FileMenuState {
    pub fn selected_command(&self) -> Option<CommandId> {
        CommandId::file_menu().nth(self.selected_index)
    }
}

/// The font picker: family list with a type-to-filter input, size and style
#[derive(Debug, Clone)]
pub struct FontPickerState {
    pub filter: EditableState<StringBuffer>,
    families: Vec<String>,
    /// Index into [`FontPickerState::filtered_families`]
    pub selected_index: usize,
    pub size: FontSize,
    pub bold: bool,
    pub italic: bool,
}

impl FontPickerState {
    /// Open on `families`, preselecting what `current` uses
    pub fn new(families: Vec<String>, current: &TextStyle, default_family: &str) -> Self {
        let wanted = current.family.as_deref().unwrap_or(default_family);
        let selected_index = families
            .iter()
            .position(|f| f.eq_ignore_ascii_case(wanted))
            .unwrap_or(0);
        Self {
            filter: EditableState::new(StringBuffer::new()),
            families,
            selected_index,
            size: current.size,
            bold: current.bold,
            italic: current.italic,
        }
    }

    pub fn filter_text(&self) -> String {
        self.filter.buffer.content()
    }

    /// Families containing the filter text, case-insensitively
    pub fn filtered_families(&self) -> Vec<&str> {
        let needle = self.filter_text().to_lowercase();
        self.families
            .iter()
            .filter(|f| needle.is_empty() || f.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn selected_family(&self) -> Option<&str> {
        self.filtered_families().get(self.selected_index).copied()
    }

    /// Keep the selection inside the filtered list
    pub fn clamp_selection(&mut self) {
        let count = self.filtered_families().len();
        self.selected_index = self.selected_index.min(count.saturating_sub(1));
    }

    /// What confirming would apply; `None` when the filter matches nothing
    pub fn choice(&self) -> Option<FontChoice> {
        Some(FontChoice {
            family: self.selected_family()?.to_string(),
            size: self.size,
            bold: self.bold,
            italic: self.italic,
        })
    }
}

/// The color picker: a grid of palette swatches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorPickerState {
    pub selected_index: usize,
}

impl ColorPickerState {
    /// Open with the swatch matching `current` preselected, if any
    pub fn new(current: Option<Color>) -> Self {
        let selected_index = current
            .and_then(|c| COLOR_PALETTE.iter().position(|(_, swatch)| *swatch == c))
            .unwrap_or(0);
        Self { selected_index }
    }

    pub fn selected_color(&self) -> Option<Color> {
        COLOR_PALETTE.get(self.selected_index).map(|(_, c)| *c)
    }
}

/// The toolbar's size dropdown list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeDropdownState {
    pub selected_index: usize,
}

impl SizeDropdownState {
    pub fn new(current: FontSize) -> Self {
        Self {
            selected_index: current.index(),
        }
    }

    pub fn selected_size(&self) -> Option<FontSize> {
        FontSize::all().nth(self.selected_index)
    }
}

#[derive(Debug, Clone)]
pub enum ModalState {
    FileMenu(FileMenuState),
    FontPicker(FontPickerState),
    ColorPicker(ColorPickerState),
    SizeDropdown(SizeDropdownState),
}

impl ModalState {
    pub fn id(&self) -> ModalId {
        match self {
            ModalState::FileMenu(_) => ModalId::FileMenu,
            ModalState::FontPicker(_) => ModalId::FontPicker,
            ModalState::ColorPicker(_) => ModalId::ColorPicker,
            ModalState::SizeDropdown(_) => ModalId::SizeDropdown,
        }
    }

    /// Number of entries navigable with Up/Down
    pub fn item_count(&self) -> usize {
        match self {
            ModalState::FileMenu(_) => CommandId::file_menu().count(),
            ModalState::FontPicker(state) => state.filtered_families().len(),
            ModalState::ColorPicker(_) => COLOR_PALETTE.len(),
            ModalState::SizeDropdown(_) => FontSize::all().count(),
        }
    }

    pub fn selected_index(&self) -> usize {
        match self {
            ModalState::FileMenu(s) => s.selected_index,
            ModalState::FontPicker(s) => s.selected_index,
            ModalState::ColorPicker(s) => s.selected_index,
            ModalState::SizeDropdown(s) => s.selected_index,
        }
    }

    /// Select an entry, clamped to the list
    pub fn set_selected_index(&mut self, index: usize) {
        let index = index.min(self.item_count().saturating_sub(1));
        match self {
            ModalState::FileMenu(s) => s.selected_index = index,
            ModalState::FontPicker(s) => s.selected_index = index,
            ModalState::ColorPicker(s) => s.selected_index = index,
            ModalState::SizeDropdown(s) => s.selected_index = index,
        }
    }
}

// ============================================================================
// UI state
// ============================================================================

#[derive(Debug, Clone)]
pub struct UiState {
    pub status_bar: StatusBar,
    pub transient_message: Option<TransientMessage>,
    pub cursor_visible: bool,
    pub last_cursor_blink: Instant,
    pub active_modal: Option<ModalState>,
    /// Whether the left mouse button is held in the text area
    pub mouse_selecting: bool,
    /// Last pointer position in physical pixels, for hover feedback
    pub pointer: Option<(f32, f32)>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            status_bar: StatusBar::new(),
            transient_message: None,
            cursor_visible: true,
            last_cursor_blink: Instant::now(),
            active_modal: None,
            mouse_selecting: false,
            pointer: None,
        }
    }

    pub fn has_modal(&self) -> bool {
        self.active_modal.is_some()
    }

    pub fn modal_id(&self) -> Option<ModalId> {
        self.active_modal.as_ref().map(ModalState::id)
    }

    pub fn open_modal(&mut self, state: ModalState) {
        self.active_modal = Some(state);
    }

    pub fn close_modal(&mut self) {
        self.active_modal = None;
    }

    /// Show the cursor and restart the blink cycle (call after input)
    pub fn reset_cursor_blink(&mut self) {
        self.cursor_visible = true;
        self.last_cursor_blink = Instant::now();
    }

    /// Flip the cursor if a blink interval has passed; returns whether it did
    pub fn update_cursor_blink(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last_cursor_blink) >= CURSOR_BLINK_INTERVAL {
            self.cursor_visible = !self.cursor_visible;
            self.last_cursor_blink = now;
            true
        } else {
            false
        }
    }

    pub fn set_transient_message(&mut self, text: impl Into<String>, duration: Duration) {
        self.transient_message = Some(TransientMessage::new(text, duration));
    }

    /// Drop the transient message once expired; returns whether it did
    pub fn expire_transient_message(&mut self, now: Instant) -> bool {
        match &self.transient_message {
            Some(msg) if msg.is_expired_at(now) => {
                self.transient_message = None;
                true
            }
            _ => false,
        }
    }

    /// Earliest instant at which something time-based changes
    pub fn next_deadline(&self) -> Instant {
        let blink = self.last_cursor_blink + CURSOR_BLINK_INTERVAL;
        match &self.transient_message {
            Some(msg) => blink.min(msg.expires_at),
            None => blink,
        }
    }
}
