//! Editor view state - scrolling and text metrics

use super::document::Document;
use super::format::FontSize;

/// Multiplier from point size to line height
pub const LINE_SPACING: f32 = 1.3;

/// Padding between the text area border and the text, in logical pixels
pub const TEXT_PADDING: f32 = 6.0;

/// Share of the text width kept beside the caret after a sideways jump
const HORIZONTAL_MARGIN: f32 = 0.25;

/// Pixel metrics shared by layout and rendering
///
/// The renderer fills in the UI font measurements once its fonts are
/// loaded; until then the defaults give a reasonable approximation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub scale_factor: f64,
    /// Average advance of the UI font used for chrome labels
    pub ui_char_width: f32,
    /// Line height of the UI font
    pub ui_line_height: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::with_scale(1.0)
    }
}

impl TextMetrics {
    pub fn with_scale(scale_factor: f64) -> Self {
        let scale = scale_factor as f32;
        Self {
            scale_factor,
            ui_char_width: (7.0 * scale).round(),
            ui_line_height: (17.0 * scale).round(),
        }
    }

    /// Pixels per typographic point (96 DPI baseline)
    pub fn px_per_point(&self) -> f32 {
        4.0 / 3.0 * self.scale_factor as f32
    }

    pub fn font_px(&self, size: FontSize) -> f32 {
        size.points() as f32 * self.px_per_point()
    }

    /// Height of a text line whose largest font is `size`
    pub fn line_height(&self, size: FontSize) -> f32 {
        (self.font_px(size) * LINE_SPACING).ceil()
    }

    /// Logical pixels scaled to physical ones
    pub fn px(&self, logical: f32) -> f32 {
        (logical * self.scale_factor as f32).round()
    }
}

/// Visible window onto the document
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// First visible line
    pub top_line: usize,
    /// Height of the text area in physical pixels
    pub height: f32,
    /// Pixels hidden off the left edge of every line
    pub scroll_x: f32,
}

#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub viewport: Viewport,
}

impl EditorState {
    pub fn new(height: f32) -> Self {
        Self {
            viewport: Viewport {
                top_line: 0,
                height,
                scroll_x: 0.0,
            },
        }
    }

    pub fn resize(&mut self, height: f32) {
        self.viewport.height = height.max(0.0);
    }

    /// Lines from `top_line` that fit in the viewport (at least one)
    pub fn visible_lines(&self, document: &Document, metrics: &TextMetrics) -> usize {
        let mut used = 0.0;
        let mut count = 0;
        for line in self.viewport.top_line..document.line_count() {
            used += metrics.line_height(document.line_max_size(line));
            if used > self.viewport.height && count > 0 {
                break;
            }
            count += 1;
        }
        count.max(1)
    }

    /// Scroll so the cursor line is fully visible, moving as little as possible
    pub fn ensure_cursor_visible(&mut self, document: &Document, metrics: &TextMetrics) {
        let line = document.cursor().line;
        let last_line = document.line_count().saturating_sub(1);
        self.viewport.top_line = self.viewport.top_line.min(last_line);

        if line < self.viewport.top_line {
            self.viewport.top_line = line;
            return;
        }

        let mut used: f32 = (self.viewport.top_line..=line)
            .map(|l| metrics.line_height(document.line_max_size(l)))
            .sum();
        while used > self.viewport.height && self.viewport.top_line < line {
            used -= metrics.line_height(document.line_max_size(self.viewport.top_line));
            self.viewport.top_line += 1;
        }
    }

    /// Scroll sideways so a caret `caret_x` pixels into its line lies
    /// within `width`
    ///
    /// When the caret leaves the view, the line jumps so that a margin of
    /// text stays visible on the side the caret is moving toward.
    pub fn reveal_x(&mut self, caret_x: f32, width: f32) {
        let width = width.max(1.0);
        let margin = (width * HORIZONTAL_MARGIN).floor();
        let scroll_x = self.viewport.scroll_x;

        if caret_x < scroll_x {
            self.viewport.scroll_x = (caret_x - margin).max(0.0);
        } else if caret_x > scroll_x + width {
            self.viewport.scroll_x = caret_x - width + margin;
        }
    }

    /// Back to the top-left corner, for a replaced document
    pub fn reset_scroll(&mut self) {
        self.viewport.top_line = 0;
        self.viewport.scroll_x = 0.0;
    }

    /// Scroll by whole lines, clamped to the document
    pub fn scroll_by(&mut self, lines: isize, document: &Document) {
        let last_line = document.line_count().saturating_sub(1);
        self.viewport.top_line = self
            .viewport
            .top_line
            .saturating_add_signed(lines)
            .min(last_line);
    }
}
