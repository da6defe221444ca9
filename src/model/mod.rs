//! Application model - the complete state of the editor
//!
//! Everything `update` reads or writes lives in [`AppModel`]. The runtime
//! owns one model and feeds it messages; the renderer only reads it.

pub mod document;
pub mod editor;
pub mod format;
pub mod layout;
pub mod status_bar;
pub mod ui;

pub use document::Document;
pub use editor::{EditorState, TextMetrics, Viewport, LINE_SPACING, TEXT_PADDING};
pub use format::{CharFormat, FontChoice, FontSize, FormatRun, FormatRuns, TextStyle};
pub use layout::{ChromeLayout, ChromeTarget, PopupLayout, PopupTarget, Rect};
pub use status_bar::{
    char_count_text, sync_status_bar, RenderedSegment, SegmentContent, SegmentId,
    SegmentPosition, StatusBar, StatusBarLayout, StatusSegment, TransientMessage,
};
pub use ui::{
    ColorPickerState, FileMenuState, FontPickerState, ModalId, ModalState, SizeDropdownState,
    UiState,
};

use crate::clipboard::ClipboardProvider;
use crate::config::EditorConfig;
use crate::fonts::FontCatalog;
use crate::theme::Theme;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    pub document: Document,
    /// Scroll state of the text area
    pub editor: EditorState,
    /// Status bar, cursor blink and popups
    pub ui: UiState,
    pub theme: Theme,
    pub config: EditorConfig,
    /// Families offered by the font picker
    pub fonts: FontCatalog,
    pub clipboard: Box<dyn ClipboardProvider>,
    /// Window size in physical pixels
    pub window_size: (u32, u32),
    pub metrics: TextMetrics,
}

impl AppModel {
    /// Create the model for a fresh, empty document
    pub fn new(
        config: EditorConfig,
        fonts: FontCatalog,
        clipboard: Box<dyn ClipboardProvider>,
        window_size: (u32, u32),
        scale_factor: f64,
    ) -> Self {
        let default_style = TextStyle::with_size(config.font_size());
        let theme = Theme::from_id(config.theme);
        let mut model = Self {
            document: Document::new(default_style),
            editor: EditorState::default(),
            ui: UiState::new(),
            theme,
            config,
            fonts,
            clipboard,
            window_size,
            metrics: TextMetrics::with_scale(scale_factor),
        };
        model.relayout();
        sync_status_bar(&mut model);
        model
    }

    pub fn chrome_layout(&self) -> ChromeLayout {
        ChromeLayout::compute(self.window_size.0, self.window_size.1, &self.metrics)
    }

    /// Layout of the open popup, if any
    pub fn popup_layout(&self) -> Option<PopupLayout> {
        let modal = self.ui.active_modal.as_ref()?;
        Some(PopupLayout::compute(modal, &self.chrome_layout(), &self.metrics))
    }

    /// Height available to text lines, inside the text area padding
    pub fn text_viewport_height(&self) -> f32 {
        let area = self.chrome_layout().text_area;
        (area.height - 2.0 * self.metrics.px(TEXT_PADDING)).max(0.0)
    }

    /// Width available to text lines, inside the text area padding
    pub fn text_viewport_width(&self) -> f32 {
        let area = self.chrome_layout().text_area;
        (area.width - 2.0 * self.metrics.px(TEXT_PADDING)).max(0.0)
    }

    /// Scroll sideways so a caret `caret_x` pixels into its line is drawn
    /// inside the text area
    pub fn reveal_caret_x(&mut self, caret_x: f32) {
        let caret_width = self.metrics.px(2.0).max(1.0);
        let width = self.text_viewport_width() - caret_width;
        self.editor.reveal_x(caret_x, width);
    }

    /// Recompute everything that depends on window size or metrics
    pub fn relayout(&mut self) {
        let height = self.text_viewport_height();
        self.editor.resize(height);
        self.editor
            .ensure_cursor_visible(&self.document, &self.metrics);
    }

    /// Keep the cursor on screen after it moved or the text changed
    pub fn ensure_cursor_visible(&mut self) {
        self.editor
            .ensure_cursor_visible(&self.document, &self.metrics);
    }

    /// Family used where a style has none
    pub fn default_family(&self) -> Option<&str> {
        self.fonts
            .default_family(self.config.font_family.as_deref())
            .map(|face| face.family.as_str())
    }

    /// The style the toolbar and pickers reflect
    pub fn current_style(&self) -> TextStyle {
        self.document.current_style()
    }
}
