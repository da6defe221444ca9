//! Window chrome: resize, hover feedback and toolbar hit testing

mod common;

use common::{send, test_model};
use quill::commands::{Cmd, CommandId};
use quill::messages::{AppMsg, EditorMsg, Msg, UiMsg};
use quill::model::{ChromeTarget, TextMetrics};

fn center(rect: quill::model::Rect) -> (f32, f32) {
    (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

#[test]
fn test_every_toolbar_button_resolves_to_its_command() {
    let model = test_model("");
    let chrome = model.chrome_layout();
    for id in CommandId::toolbar() {
        let button = chrome.button(id).unwrap();
        let (x, y) = center(button.rect);
        assert_eq!(chrome.hit_test(x, y), Some(ChromeTarget::ToolbarButton(id)));
    }
    let (x, y) = center(chrome.size_dropdown);
    assert_eq!(chrome.hit_test(x, y), Some(ChromeTarget::SizeDropdown));
}

#[test]
fn test_resize_grows_text_area() {
    let mut model = test_model("");
    let before = model.text_viewport_height();
    let cmd = send(&mut model, Msg::App(AppMsg::Resize(1024, 900)));

    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(model.window_size, (1024, 900));
    assert!(model.text_viewport_height() > before);
    assert_eq!(model.chrome_layout().status_bar.bottom(), 900.0);
}

#[test]
fn test_scale_factor_change_rescales_chrome() {
    let mut model = test_model("");
    let toolbar = model.chrome_layout().toolbar.height;
    send(&mut model, Msg::App(AppMsg::ScaleFactorChanged(2.0)));
    assert!(model.chrome_layout().toolbar.height > toolbar);
}

#[test]
fn test_measured_metrics_replace_estimates() {
    let mut model = test_model("");
    let metrics = TextMetrics {
        ui_char_width: 11.0,
        ..TextMetrics::default()
    };
    send(&mut model, Msg::App(AppMsg::MetricsChanged(metrics)));
    assert_eq!(model.metrics, metrics);
}

#[test]
fn test_hover_redraws_only_when_target_changes() {
    let mut model = test_model("");
    let chrome = model.chrome_layout();
    let (bx, by) = center(chrome.button(CommandId::SetBold).unwrap().rect);
    let (tx, ty) = center(chrome.text_area);

    assert_eq!(
        send(&mut model, Msg::Ui(UiMsg::PointerMoved { x: tx, y: ty })),
        Some(Cmd::Redraw)
    );
    assert_eq!(
        send(&mut model, Msg::Ui(UiMsg::PointerMoved { x: tx + 1.0, y: ty })),
        None
    );
    assert_eq!(
        send(&mut model, Msg::Ui(UiMsg::PointerMoved { x: bx, y: by })),
        Some(Cmd::Redraw)
    );
    send(&mut model, Msg::Ui(UiMsg::PointerLeft));
    assert_eq!(model.ui.pointer, None);
}

#[test]
fn test_scrolling_is_bounded_by_document() {
    let text = "line\n".repeat(200);
    let mut model = test_model(&text);
    send(&mut model, Msg::Editor(EditorMsg::MoveCursorDocumentStart));
    assert_eq!(model.editor.viewport.top_line, 0);

    assert_eq!(send(&mut model, Msg::Editor(EditorMsg::Scroll(-3))), None);
    send(&mut model, Msg::Editor(EditorMsg::Scroll(5)));
    assert_eq!(model.editor.viewport.top_line, 5);

    send(&mut model, Msg::Editor(EditorMsg::Scroll(10_000)));
    assert!(model.editor.viewport.top_line < model.document.line_count());
}

#[test]
fn test_cursor_at_end_of_long_document_is_visible() {
    let text = "line\n".repeat(200);
    let model = test_model(&text);
    let visible = model.editor.visible_lines(&model.document, &model.metrics);
    let top = model.editor.viewport.top_line;
    let cursor_line = model.document.cursor().line;
    assert!(cursor_line >= top && cursor_line < top + visible.max(1));
}

#[test]
fn test_cursor_at_end_of_long_line_stays_in_text_area() {
    let text = "word ".repeat(100);
    let mut model = test_model(&text);
    let width = model.text_viewport_width();

    // A caret far past the right edge, as the renderer measures it
    let caret_x = text.chars().count() as f32 * model.metrics.ui_char_width;
    assert!(caret_x > width);
    model.reveal_caret_x(caret_x);

    let on_screen = caret_x - model.editor.viewport.scroll_x;
    assert!(on_screen >= 0.0);
    assert!(on_screen <= width);

    // Back at the line start the view returns to the left edge
    send(&mut model, Msg::Editor(EditorMsg::MoveCursorLineStart));
    model.reveal_caret_x(0.0);
    assert_eq!(model.editor.viewport.scroll_x, 0.0);
}

#[test]
fn test_opening_a_file_resets_sideways_scroll() {
    let mut model = test_model(&"x".repeat(400));
    model.reveal_caret_x(4000.0);
    assert!(model.editor.viewport.scroll_x > 0.0);

    send(
        &mut model,
        Msg::App(AppMsg::FileLoaded {
            path: "short.txt".into(),
            result: Ok("short".to_string()),
        }),
    );
    assert_eq!(model.editor.viewport.scroll_x, 0.0);
}
