//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::model::editor::TextMetrics;
use crate::model::format::{FontChoice, FontSize};
use crate::model::layout::PopupTarget;
use crate::theme::Color;
use crate::util::FileError;

/// Direction for cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Cursor movement, selection and scrolling in the text area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMsg {
    // === Basic Movement ===
    MoveCursor(Direction),
    /// Move cursor by word (Ctrl/Option+Left/Right)
    MoveCursorWord(Direction),
    /// Home key
    MoveCursorLineStart,
    /// End key
    MoveCursorLineEnd,
    /// Ctrl+Home
    MoveCursorDocumentStart,
    /// Ctrl+End
    MoveCursorDocumentEnd,
    PageUp,
    PageDown,

    // === Selection Movement (Shift+key) ===
    MoveCursorWithSelection(Direction),
    MoveCursorWordWithSelection(Direction),
    MoveCursorLineStartWithSelection,
    MoveCursorLineEndWithSelection,
    MoveCursorDocumentStartWithSelection,
    MoveCursorDocumentEndWithSelection,
    SelectAll,

    // === Mouse ===
    /// Click: place the cursor and start a drag selection
    SetCursorPosition { line: usize, column: usize },
    /// Drag or Shift+click: move the head of the selection
    ExtendSelectionToPosition { line: usize, column: usize },
    /// Double click
    SelectWordAt { line: usize, column: usize },
    /// Mouse button released
    EndMouseSelection,
    /// Scroll viewport vertically by lines (positive = down)
    Scroll(i32),
}

/// Text edits and clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentMsg {
    InsertChar(char),
    InsertNewline,
    /// Backspace
    DeleteBackward,
    /// Delete key
    DeleteForward,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
}

/// Character formatting commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatMsg {
    /// Merge weight=bold; never reverts
    SetBold,
    /// Merge italic=true; never reverts
    SetItalic,
    /// Flip bold based on the style at the selection start
    ToggleBold,
    /// Flip italic based on the style at the selection start
    ToggleItalic,
    SetFontSize(FontSize),
    /// Confirmed font picker
    ApplyFont(FontChoice),
    /// Confirmed color picker
    ApplyColor(Color),
}

/// Popup menus, dropdowns and pickers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMsg {
    OpenFileMenu,
    OpenFontPicker,
    OpenColorPicker,
    OpenSizeDropdown,
    /// Escape or a click outside; cancels without effect
    Close,
    /// Arrow keys inside the popup
    Navigate(Direction),
    SelectIndex(usize),
    /// Type into the font picker filter
    InsertChar(char),
    DeleteBackward,
    /// Step the font picker size by this many sizes
    AdjustSize(i32),
    /// Font picker style checkboxes
    ToggleBold,
    ToggleItalic,
    /// Enter or OK
    Confirm,
    /// A click on a popup element
    Activate(PopupTarget),
}

/// UI messages (timers, pointer tracking, popups)
#[derive(Debug, Clone, PartialEq)]
pub enum UiMsg {
    /// Periodic timer: cursor blink and transient message expiry
    Tick,
    PointerMoved { x: f32, y: f32 },
    PointerLeft,
    Modal(ModalMsg),
}

/// Application-level messages (window, file lifecycle)
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    Resize(u32, u32),
    /// Display scale factor changed (e.g., moving between monitors)
    ScaleFactorChanged(f64),
    /// The renderer measured its UI font
    MetricsChanged(TextMetrics),

    /// File > New
    NewFile,
    /// Answer to the "discard unsaved changes?" question
    DiscardConfirmed(bool),

    /// File > Open
    OpenFileDialog,
    /// Open dialog returned a path (or None if cancelled)
    OpenFileDialogResult { path: Option<PathBuf> },
    FileLoaded {
        path: PathBuf,
        result: Result<String, FileError>,
    },

    /// File > Save
    SaveFileDialog,
    /// Save dialog returned a path (or None if cancelled)
    SaveFileDialogResult { path: Option<PathBuf> },
    SaveCompleted {
        path: PathBuf,
        result: Result<(), FileError>,
    },

    /// File > Close
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Editor(EditorMsg),
    Document(DocumentMsg),
    Format(FormatMsg),
    Ui(UiMsg),
    App(AppMsg),
}
