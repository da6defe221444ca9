//! Window geometry: menu bar, toolbar, text area, status bar and popups
//!
//! Layout is computed from the window size and [`TextMetrics`] alone so the
//! renderer draws exactly what hit-testing resolves clicks against. All
//! coordinates are physical pixels.

use crate::commands::CommandId;
use crate::theme::{COLOR_PALETTE, PALETTE_COLUMNS};

use super::editor::TextMetrics;
use super::format::FontSize;
use super::ui::ModalState;

/// Rectangle in physical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink on all sides
    pub fn inset(&self, by: f32) -> Rect {
        Rect::new(
            self.x + by,
            self.y + by,
            (self.width - 2.0 * by).max(0.0),
            (self.height - 2.0 * by).max(0.0),
        )
    }
}

/// Something clickable in the window chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeTarget {
    /// The "File" menu title
    FileMenu,
    ToolbarButton(CommandId),
    SizeDropdown,
    TextArea,
}

/// A toolbar button and where it sits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarButton {
    pub command: CommandId,
    pub rect: Rect,
}

/// Geometry of the main window
#[derive(Debug, Clone, PartialEq)]
pub struct ChromeLayout {
    pub window: Rect,
    pub menu_bar: Rect,
    pub file_menu_title: Rect,
    pub toolbar: Rect,
    pub buttons: Vec<ToolbarButton>,
    /// Where the "Size:" caption is drawn
    pub size_label: Rect,
    pub size_dropdown: Rect,
    pub text_area: Rect,
    pub status_bar: Rect,
}

/// Label width estimate shared with the renderer's centering
pub fn label_width(text: &str, metrics: &TextMetrics) -> f32 {
    text.chars().count() as f32 * metrics.ui_char_width
}

impl ChromeLayout {
    pub fn compute(width: u32, height: u32, metrics: &TextMetrics) -> Self {
        let (w, h) = (width as f32, height as f32);
        let px = |v: f32| metrics.px(v);
        let line = metrics.ui_line_height;

        let menu_h = line + px(8.0);
        let menu_bar = Rect::new(0.0, 0.0, w, menu_h);
        let file_menu_title = Rect::new(
            px(4.0),
            0.0,
            label_width("File", metrics) + px(16.0),
            menu_h,
        );

        let toolbar_h = line + px(16.0);
        let toolbar = Rect::new(0.0, menu_h, w, toolbar_h);
        let button_y = toolbar.y + px(4.0);
        let button_h = toolbar_h - px(8.0);

        let mut x = px(6.0);
        let mut buttons = Vec::new();
        for command in CommandId::toolbar() {
            let bw = label_width(command.label(), metrics) + px(16.0);
            buttons.push(ToolbarButton {
                command,
                rect: Rect::new(x, button_y, bw, button_h),
            });
            x += bw + px(4.0);
        }

        x += px(8.0);
        let size_label = Rect::new(x, button_y, label_width("Size:", metrics) + px(4.0), button_h);
        x = size_label.right() + px(2.0);
        let size_dropdown = Rect::new(x, button_y, label_width("29", metrics) + px(30.0), button_h);

        let status_h = line + px(6.0);
        let status_bar = Rect::new(0.0, (h - status_h).max(0.0), w, status_h);

        let text_top = toolbar.bottom();
        let text_area = Rect::new(0.0, text_top, w, (status_bar.y - text_top).max(0.0));

        Self {
            window: Rect::new(0.0, 0.0, w, h),
            menu_bar,
            file_menu_title,
            toolbar,
            buttons,
            size_label,
            size_dropdown,
            text_area,
            status_bar,
        }
    }

    pub fn button(&self, command: CommandId) -> Option<&ToolbarButton> {
        self.buttons.iter().find(|b| b.command == command)
    }

    /// Resolve a point to the chrome element under it
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ChromeTarget> {
        if self.file_menu_title.contains(x, y) {
            return Some(ChromeTarget::FileMenu);
        }
        if let Some(button) = self.buttons.iter().find(|b| b.rect.contains(x, y)) {
            return Some(ChromeTarget::ToolbarButton(button.command));
        }
        if self.size_dropdown.contains(x, y) {
            return Some(ChromeTarget::SizeDropdown);
        }
        if self.text_area.contains(x, y) {
            return Some(ChromeTarget::TextArea);
        }
        None
    }
}

// ============================================================================
// Popups
// ============================================================================

/// Something clickable inside a popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupTarget {
    /// A menu row, dropdown row, font family or color swatch
    Item(usize),
    SizeDown,
    SizeUp,
    ToggleBold,
    ToggleItalic,
    Confirm,
    Cancel,
}

/// Number of family rows visible in the font picker
pub const FONT_LIST_ROWS: usize = 8;

/// Geometry of the open popup
#[derive(Debug, Clone, PartialEq)]
pub struct PopupLayout {
    pub frame: Rect,
    /// Title row of dialogs, `None` for menus and dropdowns
    pub title: Option<Rect>,
    /// Filter input of the font picker
    pub filter: Option<Rect>,
    /// Visible rows: absolute item index and rectangle
    pub items: Vec<(usize, Rect)>,
    /// Size value display of the font picker
    pub size_value: Option<Rect>,
    pub controls: Vec<(PopupTarget, Rect)>,
}

/// First row to show so `selected` stays visible in a window of `rows`
fn first_visible(selected: usize, count: usize, rows: usize) -> usize {
    if count <= rows {
        0
    } else {
        selected.saturating_add(1).saturating_sub(rows).min(count - rows)
    }
}

impl PopupLayout {
    pub fn compute(modal: &ModalState, chrome: &ChromeLayout, metrics: &TextMetrics) -> Self {
        match modal {
            ModalState::FileMenu(_) => Self::file_menu(chrome, metrics),
            ModalState::SizeDropdown(state) => {
                Self::size_dropdown(state.selected_index, chrome, metrics)
            }
            ModalState::FontPicker(state) => Self::font_picker(
                state.selected_index,
                state.filtered_families().len(),
                chrome,
                metrics,
            ),
            ModalState::ColorPicker(_) => Self::color_picker(chrome, metrics),
        }
    }

    fn menu_row_height(metrics: &TextMetrics) -> f32 {
        metrics.ui_line_height + metrics.px(8.0)
    }

    fn file_menu(chrome: &ChromeLayout, metrics: &TextMetrics) -> Self {
        let row_h = Self::menu_row_height(metrics);
        // Room for a hint such as "Ctrl+N" after the label
        let hint = label_width("Ctrl+Shift+N", metrics) + metrics.px(24.0);
        let widest = CommandId::file_menu()
            .map(|id| label_width(id.label(), metrics) + hint)
            .fold(0.0, f32::max);
        let width = (widest + metrics.px(32.0)).max(metrics.px(160.0));
        let x = chrome.file_menu_title.x;
        let y = chrome.menu_bar.bottom();
        let pad = metrics.px(4.0);

        let items = (0..CommandId::file_menu().count())
            .map(|i| (i, Rect::new(x, y + pad + i as f32 * row_h, width, row_h)))
            .collect::<Vec<_>>();
        let height = items.len() as f32 * row_h + 2.0 * pad;

        Self {
            frame: Rect::new(x, y, width, height),
            title: None,
            filter: None,
            items,
            size_value: None,
            controls: Vec::new(),
        }
    }

    fn size_dropdown(selected: usize, chrome: &ChromeLayout, metrics: &TextMetrics) -> Self {
        let row_h = metrics.ui_line_height + metrics.px(4.0);
        let count = FontSize::all().count();
        let x = chrome.size_dropdown.x;
        let y = chrome.size_dropdown.bottom();
        let room = (chrome.window.bottom() - y - metrics.px(4.0)).max(row_h);
        let rows = ((room / row_h).floor() as usize).clamp(1, count);
        let first = first_visible(selected, count, rows);

        let width = chrome.size_dropdown.width;
        let items = (first..first + rows)
            .enumerate()
            .map(|(slot, i)| (i, Rect::new(x, y + slot as f32 * row_h, width, row_h)))
            .collect();

        Self {
            frame: Rect::new(x, y, width, rows as f32 * row_h),
            title: None,
            filter: None,
            items,
            size_value: None,
            controls: Vec::new(),
        }
    }

    /// Centered dialog frame of the given logical size, clamped to the window
    fn dialog_frame(chrome: &ChromeLayout, metrics: &TextMetrics, width: f32, height: f32) -> Rect {
        let width = metrics.px(width).min(chrome.window.width);
        let height = metrics.px(height).min(chrome.window.height);
        Rect::new(
            ((chrome.window.width - width) / 2.0).max(0.0),
            ((chrome.window.height - height) / 2.0).max(0.0),
            width,
            height,
        )
    }

    /// OK and Cancel, right-aligned along the bottom of `frame`
    fn dialog_buttons(frame: Rect, metrics: &TextMetrics) -> Vec<(PopupTarget, Rect)> {
        let button_w = metrics.px(80.0);
        let button_h = metrics.ui_line_height + metrics.px(10.0);
        let y = frame.bottom() - button_h - metrics.px(12.0);
        let cancel = Rect::new(frame.right() - button_w - metrics.px(12.0), y, button_w, button_h);
        let ok = Rect::new(cancel.x - button_w - metrics.px(8.0), y, button_w, button_h);
        vec![(PopupTarget::Confirm, ok), (PopupTarget::Cancel, cancel)]
    }

    fn font_picker(
        selected: usize,
        count: usize,
        chrome: &ChromeLayout,
        metrics: &TextMetrics,
    ) -> Self {
        let row_h = metrics.ui_line_height + metrics.px(6.0);
        let height = (FONT_LIST_ROWS as f32 + 6.0) * (row_h / metrics.scale_factor as f32) + 60.0;
        let frame = Self::dialog_frame(chrome, metrics, 420.0, height);
        let inner = frame.inset(metrics.px(12.0));

        let title = Rect::new(inner.x, inner.y, inner.width, row_h);
        let filter = Rect::new(inner.x, title.bottom(), inner.width, row_h);

        let list_top = filter.bottom() + metrics.px(4.0);
        let rows = FONT_LIST_ROWS.min(count);
        let first = first_visible(selected, count, FONT_LIST_ROWS);
        let items = (first..first + rows)
            .enumerate()
            .map(|(slot, i)| {
                (
                    i,
                    Rect::new(inner.x, list_top + slot as f32 * row_h, inner.width, row_h),
                )
            })
            .collect();

        let size_y = list_top + FONT_LIST_ROWS as f32 * row_h + metrics.px(8.0);
        let caption_w = label_width("Size:", metrics) + metrics.px(8.0);
        let step_w = row_h;
        let size_down = Rect::new(inner.x + caption_w, size_y, step_w, row_h);
        let size_value = Rect::new(size_down.right(), size_y, label_width("29", metrics) + metrics.px(16.0), row_h);
        let size_up = Rect::new(size_value.right(), size_y, step_w, row_h);

        let style_y = size_y + row_h + metrics.px(4.0);
        let bold_w = label_width("[x] Bold", metrics) + metrics.px(8.0);
        let bold = Rect::new(inner.x, style_y, bold_w, row_h);
        let italic = Rect::new(
            bold.right() + metrics.px(16.0),
            style_y,
            label_width("[x] Italic", metrics) + metrics.px(8.0),
            row_h,
        );

        let mut controls = vec![
            (PopupTarget::SizeDown, size_down),
            (PopupTarget::SizeUp, size_up),
            (PopupTarget::ToggleBold, bold),
            (PopupTarget::ToggleItalic, italic),
        ];
        controls.extend(Self::dialog_buttons(frame, metrics));

        Self {
            frame,
            title: Some(title),
            filter: Some(filter),
            items,
            size_value: Some(size_value),
            controls,
        }
    }

    fn color_picker(chrome: &ChromeLayout, metrics: &TextMetrics) -> Self {
        let swatch = 40.0;
        let gap = 8.0;
        let rows = COLOR_PALETTE.len().div_ceil(PALETTE_COLUMNS);
        let grid_w = PALETTE_COLUMNS as f32 * (swatch + gap) - gap;
        let grid_h = rows as f32 * (swatch + gap) - gap;
        let title_h = metrics.ui_line_height / metrics.scale_factor as f32 + 10.0;
        let buttons_h = metrics.ui_line_height / metrics.scale_factor as f32 + 34.0;
        let frame = Self::dialog_frame(
            chrome,
            metrics,
            (grid_w + 24.0).max(240.0),
            title_h + grid_h + buttons_h + 36.0,
        );
        let inner = frame.inset(metrics.px(12.0));
        let title = Rect::new(inner.x, inner.y, inner.width, metrics.px(title_h));

        let grid_x = frame.x + (frame.width - metrics.px(grid_w)) / 2.0;
        let grid_y = title.bottom() + metrics.px(8.0);
        let items = (0..COLOR_PALETTE.len())
            .map(|i| {
                let col = (i % PALETTE_COLUMNS) as f32;
                let row = (i / PALETTE_COLUMNS) as f32;
                (
                    i,
                    Rect::new(
                        grid_x + metrics.px(col * (swatch + gap)),
                        grid_y + metrics.px(row * (swatch + gap)),
                        metrics.px(swatch),
                        metrics.px(swatch),
                    ),
                )
            })
            .collect();

        Self {
            frame,
            title: Some(title),
            filter: None,
            items,
            size_value: None,
            controls: Self::dialog_buttons(frame, metrics),
        }
    }

    /// Resolve a click inside the popup
    pub fn hit_test(&self, x: f32, y: f32) -> Option<PopupTarget> {
        if let Some((index, _)) = self.items.iter().find(|(_, rect)| rect.contains(x, y)) {
            return Some(PopupTarget::Item(*index));
        }
        self.controls
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(target, _)| *target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::format::TextStyle;
    use crate::model::ui::{
        ColorPickerState, FileMenuState, FontPickerState, SizeDropdownState,
    };

    fn layout() -> (ChromeLayout, TextMetrics) {
        let metrics = TextMetrics::default();
        (ChromeLayout::compute(800, 600, &metrics), metrics)
    }

    #[test]
    fn test_regions_stack_vertically() {
        let (chrome, _) = layout();
        assert_eq!(chrome.menu_bar.y, 0.0);
        assert_eq!(chrome.toolbar.y, chrome.menu_bar.bottom());
        assert_eq!(chrome.text_area.y, chrome.toolbar.bottom());
        assert_eq!(chrome.text_area.bottom(), chrome.status_bar.y);
        assert_eq!(chrome.status_bar.bottom(), 600.0);
    }

    #[test]
    fn test_toolbar_buttons_in_order_then_dropdown() {
        let (chrome, _) = layout();
        let commands: Vec<_> = chrome.buttons.iter().map(|b| b.command).collect();
        assert_eq!(
            commands,
            vec![
                CommandId::Cut,
                CommandId::Copy,
                CommandId::Paste,
                CommandId::SelectFont,
                CommandId::SetBold,
                CommandId::SetItalic,
            ]
        );
        assert!(chrome.buttons.windows(2).all(|p| p[0].rect.right() < p[1].rect.x));
        let last = chrome.buttons.last().unwrap();
        assert!(chrome.size_dropdown.x > last.rect.right());
    }

    #[test]
    fn test_chrome_hit_test() {
        let (chrome, _) = layout();
        let bold = chrome.button(CommandId::SetBold).unwrap().rect;
        assert_eq!(
            chrome.hit_test(bold.x + 2.0, bold.y + 2.0),
            Some(ChromeTarget::ToolbarButton(CommandId::SetBold))
        );
        let file = chrome.file_menu_title;
        assert_eq!(
            chrome.hit_test(file.x + 1.0, file.y + 1.0),
            Some(ChromeTarget::FileMenu)
        );
        let dd = chrome.size_dropdown;
        assert_eq!(
            chrome.hit_test(dd.x + 1.0, dd.y + 1.0),
            Some(ChromeTarget::SizeDropdown)
        );
        assert_eq!(chrome.hit_test(400.0, 300.0), Some(ChromeTarget::TextArea));
        assert_eq!(chrome.hit_test(400.0, 599.0), None);
    }

    #[test]
    fn test_tiny_window_does_not_go_negative() {
        let metrics = TextMetrics::default();
        let chrome = ChromeLayout::compute(10, 10, &metrics);
        assert!(chrome.text_area.height >= 0.0);
    }

    #[test]
    fn test_file_menu_rows() {
        let (chrome, metrics) = layout();
        let popup = PopupLayout::compute(&ModalState::FileMenu(FileMenuState::default()), &chrome, &metrics);
        assert_eq!(popup.items.len(), 4);
        let (_, save_row) = popup.items[2];
        assert_eq!(
            popup.hit_test(save_row.x + 5.0, save_row.y + 2.0),
            Some(PopupTarget::Item(2))
        );
        assert!(popup.frame.y >= chrome.menu_bar.bottom());
    }

    #[test]
    fn test_size_dropdown_keeps_selection_visible() {
        let metrics = TextMetrics::default();
        let chrome = ChromeLayout::compute(800, 200, &metrics);
        let modal = ModalState::SizeDropdown(SizeDropdownState { selected_index: 21 });
        let popup = PopupLayout::compute(&modal, &chrome, &metrics);
        assert!(popup.items.len() < 22);
        assert_eq!(popup.items.last().map(|(i, _)| *i), Some(21));
    }

    #[test]
    fn test_size_dropdown_shows_all_when_room() {
        let (chrome, metrics) = layout();
        let modal = ModalState::SizeDropdown(SizeDropdownState::new(FontSize::default()));
        let popup = PopupLayout::compute(&modal, &chrome, &metrics);
        assert_eq!(popup.items.len(), 22);
        assert_eq!(popup.items[0].0, 0);
    }

    #[test]
    fn test_font_picker_controls() {
        let (chrome, metrics) = layout();
        let families = (0..20).map(|i| format!("Family{i}")).collect();
        let mut picker = FontPickerState::new(families, &TextStyle::default(), "Family0");
        picker.selected_index = 12;
        let popup = PopupLayout::compute(&ModalState::FontPicker(picker), &chrome, &metrics);
        assert_eq!(popup.items.len(), FONT_LIST_ROWS);
        assert_eq!(popup.items.last().map(|(i, _)| *i), Some(12));
        let targets: Vec<_> = popup.controls.iter().map(|(t, _)| *t).collect();
        assert!(targets.contains(&PopupTarget::SizeUp));
        assert!(targets.contains(&PopupTarget::Confirm));
        assert!(targets.contains(&PopupTarget::Cancel));
        assert!(popup
            .controls
            .iter()
            .all(|(_, rect)| rect.bottom() <= popup.frame.bottom()));
    }

    #[test]
    fn test_color_picker_grid() {
        let (chrome, metrics) = layout();
        let popup = PopupLayout::compute(&ModalState::ColorPicker(ColorPickerState::default()), &chrome, &metrics);
        assert_eq!(popup.items.len(), COLOR_PALETTE.len());
        let (_, fifth) = popup.items[PALETTE_COLUMNS];
        let (_, first) = popup.items[0];
        assert!(fifth.y > first.y);
        assert_eq!(fifth.x, first.x);
    }
}
