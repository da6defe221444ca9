//! Status bar tests - live character count and the save confirmation

mod common;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use common::{select_columns, send, test_model};
use quill::commands::{Cmd, CommandId};
use quill::messages::{AppMsg, DocumentMsg, Msg, UiMsg};
use quill::model::{SegmentContent, SegmentId, StatusBar};
use quill::update::SAVED_MESSAGE;

fn char_count(model: &quill::AppModel) -> &str {
    model.ui.status_bar.segment_text(SegmentId::CharCount)
}

fn saved(model: &mut quill::AppModel) -> Option<Cmd> {
    send(
        model,
        Msg::App(AppMsg::SaveCompleted {
            path: PathBuf::from("/tmp/saved.txt"),
            result: Ok(()),
        }),
    )
}

// =============================================================================
// Character count
// =============================================================================

#[test]
fn test_fresh_model_shows_zero() {
    let model = test_model("");
    assert_eq!(char_count(&model), "Characters: 0");
}

#[test]
fn test_count_follows_typing() {
    let mut model = test_model("");
    for ch in "hey".chars() {
        send(&mut model, Msg::Document(DocumentMsg::InsertChar(ch)));
    }
    assert_eq!(char_count(&model), "Characters: 3");

    send(&mut model, Msg::Document(DocumentMsg::DeleteBackward));
    assert_eq!(char_count(&model), "Characters: 2");
}

#[test]
fn test_count_includes_newlines() {
    let mut model = test_model("ab");
    send(&mut model, Msg::Document(DocumentMsg::InsertNewline));
    assert_eq!(char_count(&model), "Characters: 3");
}

#[test]
fn test_count_ignores_formatting() {
    let mut model = test_model("hello");
    select_columns(&mut model, 0, 5);
    send(&mut model, CommandId::SetBold.to_msg());
    assert_eq!(char_count(&model), "Characters: 5");
}

#[test]
fn test_count_after_cut() {
    let mut model = test_model("hello world");
    select_columns(&mut model, 5, 11);
    send(&mut model, CommandId::Cut.to_msg());
    assert_eq!(char_count(&model), "Characters: 5");
}

// =============================================================================
// Save confirmation
// =============================================================================

#[test]
fn test_no_message_before_saving() {
    let model = test_model("text");
    assert_eq!(model.ui.status_bar.segment_text(SegmentId::StatusMessage), "");
    assert_eq!(model.ui.status_bar.visible_segments().count(), 1);
}

#[test]
fn test_save_message_lasts_three_seconds() {
    let mut model = test_model("text");
    let before = Instant::now();
    saved(&mut model);
    let after = Instant::now();

    let message = model.ui.transient_message.as_ref().unwrap();
    assert_eq!(message.text, SAVED_MESSAGE);
    assert!(message.expires_at >= before + Duration::from_secs(3));
    assert!(message.expires_at <= after + Duration::from_secs(3));
    assert!(!message.is_expired_at(before + Duration::from_millis(2900)));
    assert!(message.is_expired_at(after + Duration::from_secs(3)));
}

#[test]
fn test_message_cleared_by_tick_after_expiry() {
    let mut model = test_model("text");
    model.config.status_message_ms = 0;
    saved(&mut model);
    assert_eq!(
        model.ui.status_bar.segment_text(SegmentId::StatusMessage),
        SAVED_MESSAGE
    );

    let cmd = send(&mut model, Msg::Ui(UiMsg::Tick));

    assert_eq!(cmd, Some(Cmd::Redraw));
    assert!(model.ui.transient_message.is_none());
    assert_eq!(model.ui.status_bar.segment_text(SegmentId::StatusMessage), "");
}

#[test]
fn test_message_survives_editing() {
    let mut model = test_model("text");
    saved(&mut model);
    send(&mut model, Msg::Document(DocumentMsg::InsertChar('!')));
    assert_eq!(
        model.ui.status_bar.segment_text(SegmentId::StatusMessage),
        SAVED_MESSAGE
    );
    assert_eq!(char_count(&model), "Characters: 5");
}

#[test]
fn test_second_save_restarts_timer() {
    let mut model = test_model("text");
    saved(&mut model);
    let first = model.ui.transient_message.as_ref().unwrap().expires_at;
    std::thread::sleep(Duration::from_millis(5));
    saved(&mut model);
    let second = model.ui.transient_message.as_ref().unwrap().expires_at;
    assert!(second > first);
}

#[test]
fn test_next_deadline_includes_message_expiry() {
    let mut model = test_model("text");
    model.config.status_message_ms = 10;
    saved(&mut model);
    let expires_at = model.ui.transient_message.as_ref().unwrap().expires_at;
    assert!(model.ui.next_deadline() <= expires_at);
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_layout_message_left_count_right() {
    let mut bar = StatusBar::new();
    bar.update_segment(
        SegmentId::StatusMessage,
        SegmentContent::Text(SAVED_MESSAGE.to_string()),
    );
    let layout = bar.layout(800.0, |text| text.chars().count() as f32 * 8.0);

    assert_eq!(layout.left.len(), 1);
    assert_eq!(layout.left[0].id, SegmentId::StatusMessage);
    assert_eq!(layout.right.len(), 1);
    assert_eq!(layout.right[0].id, SegmentId::CharCount);
    assert!(layout.left[0].x + layout.left[0].width < layout.right[0].x);
}

#[test]
fn test_narrow_bar_keeps_count() {
    let mut bar = StatusBar::new();
    bar.update_segment(
        SegmentId::StatusMessage,
        SegmentContent::Text(SAVED_MESSAGE.to_string()),
    );
    let layout = bar.layout(150.0, |text| text.chars().count() as f32 * 8.0);

    assert!(layout.left.is_empty());
    assert_eq!(layout.right.len(), 1);
}
