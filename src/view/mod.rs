//! View module - draws the model into the window
//!
//! Contains the Renderer and the drawing code for each region of the window:
//! menu bar, toolbar, text area, status bar and the open popup.

pub mod frame;
pub mod text;

pub use frame::{Frame, GlyphEffects};
pub use text::{layout_line, layout_lines, FontStore};

use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use softbuffer::Surface;
use winit::window::Window;

use quill::commands::CommandId;
use quill::editable::Position;
use quill::fonts::FontCatalog;
use quill::keymap::Keymap;
use quill::model::{
    AppModel, ChromeLayout, ChromeTarget, FontSize, ModalId, ModalState, PopupLayout,
    PopupTarget, Rect, TextMetrics, LINE_SPACING, TEXT_PADDING,
};
use quill::theme::COLOR_PALETTE;

/// Point size of labels in the menu bar, toolbar, status bar and popups
const UI_FONT_SIZE: f32 = 13.0;

/// Text alignment inside a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    /// Flush with the rectangle's left edge
    Start,
    Left,
    Center,
    Right,
}

/// Draws UI labels with the default face
struct Painter<'a> {
    fonts: &'a mut FontStore,
    px: f32,
    /// Horizontal inset for left/right aligned labels
    inset: f32,
}

impl Painter<'_> {
    fn measure(&self, text: &str) -> f32 {
        self.fonts.ui().measure(text, self.px)
    }

    /// Draw `text` vertically centered in `rect`
    fn label(&mut self, frame: &mut Frame, text: &str, rect: Rect, color: u32, align: Align) {
        self.styled_label(frame, text, rect, color, align, GlyphEffects::default());
    }

    fn styled_label(
        &mut self,
        frame: &mut Frame,
        text: &str,
        rect: Rect,
        color: u32,
        align: Align,
        effects: GlyphEffects,
    ) {
        let width = self.measure(text);
        let x = match align {
            Align::Start => rect.x,
            Align::Left => rect.x + self.inset,
            Align::Center => rect.x + ((rect.width - width) / 2.0).max(0.0),
            Align::Right => rect.right() - self.inset - width,
        };
        let face = self.fonts.ui_mut();
        let (ascent, descent) = face.ascent_descent(self.px);
        let baseline = rect.y + ((rect.height - (ascent + descent)) / 2.0).max(0.0) + ascent;
        face.draw(
            frame,
            text,
            x.round(),
            baseline.round(),
            self.px,
            color,
            effects,
        );
    }
}

pub struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    /// Persistent back buffer; softbuffer doesn't guarantee its buffer
    /// contents survive between frames.
    back_buffer: Vec<u32>,
    width: u32,
    height: u32,
    fonts: FontStore,
    scale_factor: f64,
}

impl Renderer {
    /// Create a renderer for `window`, loading the default face from `catalog`
    pub fn new(
        window: Rc<Window>,
        context: &softbuffer::Context<Rc<Window>>,
        catalog: &FontCatalog,
        preferred_family: Option<&str>,
    ) -> Result<Self> {
        let scale_factor = window.scale_factor();
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        let mut surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow!("Failed to create surface: {}", e))?;
        resize_surface(&mut surface, width, height)?;

        let fonts = FontStore::new(catalog, preferred_family)?;

        Ok(Self {
            surface,
            back_buffer: vec![0u32; (width as usize) * (height as usize)],
            width,
            height,
            fonts,
            scale_factor,
        })
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    fn ui_px(&self) -> f32 {
        UI_FONT_SIZE * self.scale_factor as f32
    }

    /// Measurements of the UI font for layout
    pub fn text_metrics(&self) -> TextMetrics {
        const SAMPLE: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
        let px = self.ui_px();
        let average = self.fonts.ui().measure(SAMPLE, px) / SAMPLE.len() as f32;
        TextMetrics {
            scale_factor: self.scale_factor,
            ui_char_width: average.ceil(),
            ui_line_height: (px * LINE_SPACING).ceil(),
        }
    }

    /// Family the default face was loaded from
    pub fn default_family(&self) -> &str {
        self.fonts.fallback_family()
    }

    /// Document position under a window point, for clicks in the text area
    pub fn pixel_to_position(&mut self, x: f32, y: f32, model: &AppModel) -> Position {
        let area = text_inner_rect(&model.chrome_layout(), &model.metrics);
        let lines = layout_lines(
            &mut self.fonts,
            &model.fonts,
            &model.document,
            &model.metrics,
            &model.editor.viewport,
            area,
        );

        // Points above the first line or below the last snap to them
        match lines.iter().find(|l| y < l.bottom()).or(lines.last()) {
            Some(layout) => Position::new(layout.line, layout.column_at(x)),
            None => Position::new(0, 0),
        }
    }

    /// How far the cursor sits from the start of its line, in pixels
    pub fn caret_offset(&mut self, model: &AppModel) -> f32 {
        let cursor = model.document.cursor();
        layout_line(
            &mut self.fonts,
            &model.fonts,
            &model.document,
            &model.metrics,
            cursor.line,
            0.0,
            0.0,
        )
        .column_x(cursor.column)
    }

    pub fn render(&mut self, model: &AppModel, keymap: &Keymap) -> Result<()> {
        let (width, height) = model.window_size;
        let (width, height) = (width.max(1), height.max(1));
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.back_buffer
                .resize((width as usize) * (height as usize), 0);
            resize_surface(&mut self.surface, width, height)?;
        }

        let chrome = model.chrome_layout();
        let px = self.ui_px();
        let inset = model.metrics.px(8.0);
        let mut frame = Frame::new(
            &mut self.back_buffer,
            self.width as usize,
            self.height as usize,
        );
        frame.clear(model.theme.editor.background.to_argb_u32());

        render_text_area(&mut frame, &mut self.fonts, model, &chrome);

        let mut painter = Painter {
            fonts: &mut self.fonts,
            px,
            inset,
        };
        render_menu_bar(&mut frame, &mut painter, model, &chrome);
        render_toolbar(&mut frame, &mut painter, model, &chrome);
        render_status_bar(&mut frame, &mut painter, model, &chrome);
        render_popup(&mut frame, &mut painter, model, keymap);

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow!("Failed to get surface buffer: {}", e))?;
        let len = buffer.len().min(self.back_buffer.len());
        buffer[..len].copy_from_slice(&self.back_buffer[..len]);
        buffer
            .present()
            .map_err(|e| anyhow!("Failed to present buffer: {}", e))?;

        Ok(())
    }
}

fn resize_surface(
    surface: &mut Surface<Rc<Window>, Rc<Window>>,
    width: u32,
    height: u32,
) -> Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
        return Ok(());
    };
    surface
        .resize(w, h)
        .map_err(|e| anyhow!("Failed to resize surface: {}", e))
}

/// Region of the text area lines are drawn in
fn text_inner_rect(chrome: &ChromeLayout, metrics: &TextMetrics) -> Rect {
    chrome.text_area.inset(metrics.px(TEXT_PADDING))
}

fn hovered_chrome(model: &AppModel, chrome: &ChromeLayout) -> Option<ChromeTarget> {
    if model.ui.has_modal() {
        return None;
    }
    let (x, y) = model.ui.pointer?;
    chrome.hit_test(x, y)
}

// ============================================================================
// Text area
// ============================================================================

fn render_text_area(
    frame: &mut Frame,
    fonts: &mut FontStore,
    model: &AppModel,
    chrome: &ChromeLayout,
) {
    let theme = &model.theme.editor;
    frame.fill_rect(chrome.text_area, theme.background.to_argb_u32());

    let area = text_inner_rect(chrome, &model.metrics);
    let document = &model.document;
    let lines = layout_lines(
        fonts,
        &model.fonts,
        document,
        &model.metrics,
        &model.editor.viewport,
        area,
    );

    // Lines scrolled sideways stay out of the padding
    frame.set_clip(Rect::new(
        area.x,
        chrome.text_area.y,
        area.width,
        chrome.text_area.height,
    ));

    // Selection
    let selection = document.selection_range();
    if !selection.is_empty() {
        let color = theme.selection_background.to_argb_u32();
        let newline_width = model.metrics.px(4.0);
        for layout in &lines {
            let range = document.line_range(layout.line);
            let start = selection.start.max(range.start);
            let end = selection.end.min(range.end);
            let past_end = selection.end > range.end && selection.start <= range.end;
            if start > end || (start == end && !past_end) {
                continue;
            }
            let x0 = layout.column_x(start - range.start);
            let mut x1 = layout.column_x(end - range.start);
            if past_end {
                x1 += newline_width;
            }
            frame.fill_rect(
                Rect::new(x0, layout.top, x1 - x0, layout.height),
                color,
            );
        }
    }

    // Text
    let default_color = theme.foreground.to_argb_u32();
    for layout in &lines {
        for span in &layout.spans {
            let color = span
                .style
                .color
                .map_or(default_color, |c| c.to_argb_u32());
            let x = layout.column_x(span.columns.start);
            fonts.face(span.style.family.as_deref(), &model.fonts).draw(
                frame,
                &span.text,
                x,
                layout.baseline,
                span.px,
                color,
                span.effects(),
            );
        }
    }

    // Cursor
    if model.ui.cursor_visible && !model.ui.has_modal() {
        let cursor = document.cursor();
        if let Some(layout) = lines.iter().find(|l| l.line == cursor.line) {
            let x = layout.column_x(cursor.column);
            let width = model.metrics.px(2.0).max(1.0);
            frame.fill_rect(
                Rect::new(x, layout.top, width, layout.height),
                theme.cursor_color.to_argb_u32(),
            );
        }
    }

    frame.clear_clip();
}

// ============================================================================
// Chrome
// ============================================================================

fn render_menu_bar(
    frame: &mut Frame,
    painter: &mut Painter,
    model: &AppModel,
    chrome: &ChromeLayout,
) {
    let theme = &model.theme.chrome;
    frame.fill_rect(chrome.menu_bar, theme.menu_bar_background.to_argb_u32());

    let open = model.ui.modal_id() == Some(ModalId::FileMenu);
    let hovered = hovered_chrome(model, chrome) == Some(ChromeTarget::FileMenu);
    let title = chrome.file_menu_title;
    let fg = if open {
        frame.fill_rect(title, model.theme.popup.highlight_background.to_argb_u32());
        model.theme.popup.highlight_foreground
    } else {
        if hovered {
            frame.fill_rect(title, theme.button_hover_background.to_argb_u32());
        }
        theme.foreground
    };
    painter.label(frame, "File", title, fg.to_argb_u32(), Align::Center);
}

fn render_toolbar(
    frame: &mut Frame,
    painter: &mut Painter,
    model: &AppModel,
    chrome: &ChromeLayout,
) {
    let theme = &model.theme.chrome;
    frame.fill_rect(chrome.toolbar, theme.toolbar_background.to_argb_u32());
    let border = theme.border.to_argb_u32();
    frame.fill_rect(
        Rect::new(0.0, chrome.toolbar.y, chrome.toolbar.width, 1.0),
        border,
    );
    frame.fill_rect(
        Rect::new(0.0, chrome.toolbar.bottom() - 1.0, chrome.toolbar.width, 1.0),
        border,
    );

    let hovered = hovered_chrome(model, chrome);
    let style = model.current_style();
    let fg = theme.foreground.to_argb_u32();

    for button in &chrome.buttons {
        let active = match button.command {
            CommandId::SetBold => style.bold,
            CommandId::SetItalic => style.italic,
            _ => false,
        };
        let is_hovered = hovered == Some(ChromeTarget::ToolbarButton(button.command));
        let fill = if is_hovered || active {
            theme.button_hover_background
        } else {
            theme.button_background
        };
        frame.draw_bordered_rect(button.rect, fill.to_argb_u32(), border);

        // Style buttons preview the style they apply
        let effects = GlyphEffects {
            bold: button.command == CommandId::SetBold,
            italic: button.command == CommandId::SetItalic,
        };
        painter.styled_label(
            frame,
            button.command.label(),
            button.rect,
            fg,
            Align::Center,
            effects,
        );
    }

    painter.label(frame, "Size:", chrome.size_label, fg, Align::Left);

    let dropdown = chrome.size_dropdown;
    let fill = if hovered == Some(ChromeTarget::SizeDropdown) {
        theme.button_hover_background
    } else {
        theme.button_background
    };
    frame.draw_bordered_rect(dropdown, fill.to_argb_u32(), border);
    let arrow_w = dropdown.height;
    let value = Rect::new(dropdown.x, dropdown.y, dropdown.width - arrow_w, dropdown.height);
    painter.label(
        frame,
        &style.size.points().to_string(),
        value,
        fg,
        Align::Left,
    );
    frame.draw_down_arrow(
        Rect::new(value.right(), dropdown.y, arrow_w, dropdown.height),
        fg,
    );
}

fn render_status_bar(
    frame: &mut Frame,
    painter: &mut Painter,
    model: &AppModel,
    chrome: &ChromeLayout,
) {
    let theme = &model.theme.status_bar;
    let bar = chrome.status_bar;
    frame.fill_rect(bar, theme.background.to_argb_u32());
    frame.fill_rect(
        Rect::new(bar.x, bar.y, bar.width, 1.0),
        model.theme.chrome.border.to_argb_u32(),
    );

    let layout = model
        .ui
        .status_bar
        .layout(bar.width, |text| painter.measure(text));
    let fg = theme.foreground.to_argb_u32();
    for seg in layout.left.iter().chain(&layout.right) {
        let rect = Rect::new(bar.x + seg.x, bar.y, seg.width + 1.0, bar.height);
        painter.label(frame, &seg.text, rect, fg, Align::Start);
    }
}

// ============================================================================
// Popups
// ============================================================================

fn render_popup(frame: &mut Frame, painter: &mut Painter, model: &AppModel, keymap: &Keymap) {
    let Some(modal) = &model.ui.active_modal else {
        return;
    };
    let Some(layout) = model.popup_layout() else {
        return;
    };
    let theme = &model.theme.popup;

    if layout.title.is_some() {
        frame.blend_rect(
            Rect::new(0.0, 0.0, model.window_size.0 as f32, model.window_size.1 as f32),
            theme.backdrop.to_argb_u32(),
        );
    }
    frame.draw_bordered_rect(
        layout.frame,
        theme.background.to_argb_u32(),
        theme.border.to_argb_u32(),
    );

    let hovered = model.ui.pointer.and_then(|(x, y)| layout.hit_test(x, y));

    match modal {
        ModalState::FileMenu(state) => {
            let commands: Vec<_> = CommandId::file_menu().collect();
            for &(index, rect) in &layout.items {
                let Some(&command) = commands.get(index) else {
                    continue;
                };
                let fg = list_row(frame, model, rect, index, state.selected_index, hovered);
                painter.label(frame, command.label(), rect, fg, Align::Left);
                if let Some(hint) = keymap.display_for(command) {
                    let hint_fg = if fg == theme.foreground.to_argb_u32() {
                        theme.dimmed_foreground.to_argb_u32()
                    } else {
                        fg
                    };
                    painter.label(frame, &hint, rect, hint_fg, Align::Right);
                }
            }
        }

        ModalState::SizeDropdown(state) => {
            for &(index, rect) in &layout.items {
                let Some(size) = FontSize::all().nth(index) else {
                    continue;
                };
                let fg = list_row(frame, model, rect, index, state.selected_index, hovered);
                painter.label(frame, &size.points().to_string(), rect, fg, Align::Left);
            }
        }

        ModalState::FontPicker(state) => {
            let fg = theme.foreground.to_argb_u32();
            if let Some(title) = layout.title {
                painter.label(frame, "Font", title, fg, Align::Left);
            }
            if let Some(filter) = layout.filter {
                let input = filter.inset(model.metrics.px(2.0));
                frame.draw_bordered_rect(
                    input,
                    model.theme.editor.background.to_argb_u32(),
                    theme.border.to_argb_u32(),
                );
                let text = state.filter_text();
                let shown = if text.is_empty() {
                    "Type to filter..."
                } else {
                    text.as_str()
                };
                let color = if text.is_empty() {
                    theme.dimmed_foreground.to_argb_u32()
                } else {
                    fg
                };
                painter.label(frame, shown, input, color, Align::Left);
                if !text.is_empty() {
                    let caret_x = input.x + painter.inset + painter.measure(&text) + 1.0;
                    frame.fill_rect(
                        Rect::new(caret_x, input.y + 3.0, 1.0, input.height - 6.0),
                        fg,
                    );
                }
            }

            let families = state.filtered_families();
            if families.is_empty() {
                if let Some(filter) = layout.filter {
                    let below = Rect::new(filter.x, filter.bottom(), filter.width, filter.height);
                    painter.label(
                        frame,
                        "No matching fonts",
                        below,
                        theme.dimmed_foreground.to_argb_u32(),
                        Align::Left,
                    );
                }
            }
            for &(index, rect) in &layout.items {
                let Some(family) = families.get(index) else {
                    continue;
                };
                let row_fg = list_row(frame, model, rect, index, state.selected_index, hovered);
                painter.label(frame, family, rect, row_fg, Align::Left);
            }

            if let Some(value) = layout.size_value {
                frame.draw_bordered_rect(
                    value,
                    model.theme.editor.background.to_argb_u32(),
                    theme.border.to_argb_u32(),
                );
                painter.label(frame, &state.size.points().to_string(), value, fg, Align::Center);
            }

            for &(target, rect) in &layout.controls {
                let label = match target {
                    PopupTarget::SizeDown => "-".to_string(),
                    PopupTarget::SizeUp => "+".to_string(),
                    PopupTarget::ToggleBold => checkbox("Bold", state.bold),
                    PopupTarget::ToggleItalic => checkbox("Italic", state.italic),
                    _ => continue,
                };
                if matches!(target, PopupTarget::SizeDown | PopupTarget::SizeUp) {
                    control_button(frame, model, rect, hovered == Some(target));
                    painter.label(frame, &label, rect, fg, Align::Center);
                } else {
                    painter.label(frame, &label, rect, fg, Align::Start);
                }
            }

            // Caption sits left of the size stepper
            if let Some((_, down)) = layout
                .controls
                .iter()
                .find(|(target, _)| *target == PopupTarget::SizeDown)
            {
                let inner_x = layout.frame.x + model.metrics.px(12.0);
                let caption = Rect::new(inner_x, down.y, down.x - inner_x, down.height);
                painter.label(frame, "Size:", caption, fg, Align::Start);
            }

            render_dialog_buttons(frame, painter, model, &layout, hovered);
        }

        ModalState::ColorPicker(state) => {
            if let Some(title) = layout.title {
                painter.label(
                    frame,
                    "Color",
                    title,
                    theme.foreground.to_argb_u32(),
                    Align::Left,
                );
            }
            for &(index, rect) in &layout.items {
                let Some((_, color)) = COLOR_PALETTE.get(index) else {
                    continue;
                };
                frame.draw_bordered_rect(rect, color.to_argb_u32(), theme.border.to_argb_u32());
                if index == state.selected_index {
                    let ring = theme.highlight_background.to_argb_u32();
                    frame.stroke_rect(rect.inset(-2.0), ring);
                    frame.stroke_rect(rect.inset(-3.0), ring);
                } else if hovered == Some(PopupTarget::Item(index)) {
                    frame.stroke_rect(rect.inset(-2.0), theme.dimmed_foreground.to_argb_u32());
                }
            }
            render_dialog_buttons(frame, painter, model, &layout, hovered);
        }
    }
}

/// Background of a list row; returns the text color to draw it with
fn list_row(
    frame: &mut Frame,
    model: &AppModel,
    rect: Rect,
    index: usize,
    selected: usize,
    hovered: Option<PopupTarget>,
) -> u32 {
    let theme = &model.theme.popup;
    let highlighted = match hovered {
        Some(PopupTarget::Item(h)) => h == index,
        _ => index == selected,
    };
    if highlighted {
        frame.fill_rect(rect, theme.highlight_background.to_argb_u32());
        theme.highlight_foreground.to_argb_u32()
    } else {
        theme.foreground.to_argb_u32()
    }
}

fn control_button(frame: &mut Frame, model: &AppModel, rect: Rect, hovered: bool) {
    let chrome = &model.theme.chrome;
    let fill = if hovered {
        chrome.button_hover_background
    } else {
        chrome.button_background
    };
    frame.draw_bordered_rect(rect, fill.to_argb_u32(), chrome.border.to_argb_u32());
}

fn render_dialog_buttons(
    frame: &mut Frame,
    painter: &mut Painter,
    model: &AppModel,
    layout: &PopupLayout,
    hovered: Option<PopupTarget>,
) {
    let fg = model.theme.chrome.foreground.to_argb_u32();
    for &(target, rect) in &layout.controls {
        let label = match target {
            PopupTarget::Confirm => "OK",
            PopupTarget::Cancel => "Cancel",
            _ => continue,
        };
        control_button(frame, model, rect, hovered == Some(target));
        painter.label(frame, label, rect, fg, Align::Center);
    }
}

fn checkbox(label: &str, checked: bool) -> String {
    format!("[{}] {}", if checked { "x" } else { " " }, label)
}
