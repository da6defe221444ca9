//! Status bar model - segments, transient messages and layout
//!
//! The bar has a permanent character count on the right and a slot on the
//! left for short-lived confirmations such as "File saved successfully.".

use std::time::{Duration, Instant};

use super::AppModel;

/// Identifier for status bar segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentId {
    /// Transient status messages
    StatusMessage,
    /// Live character count ("Characters: 42")
    CharCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentPosition {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentContent {
    Empty,
    Text(String),
}

impl SegmentContent {
    pub fn display_text(&self) -> &str {
        match self {
            SegmentContent::Empty => "",
            SegmentContent::Text(s) => s,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.display_text().is_empty()
    }
}

/// A single segment in the status bar
#[derive(Debug, Clone)]
pub struct StatusSegment {
    pub id: SegmentId,
    pub position: SegmentPosition,
    pub content: SegmentContent,
}

impl StatusSegment {
    pub fn new(id: SegmentId, content: SegmentContent) -> Self {
        let position = match id {
            SegmentId::StatusMessage => SegmentPosition::Left,
            SegmentId::CharCount => SegmentPosition::Right,
        };
        Self {
            id,
            position,
            content,
        }
    }
}

/// Text of the character count segment
pub fn char_count_text(count: usize) -> String {
    format!("Characters: {}", count)
}

#[derive(Debug, Clone)]
pub struct StatusBar {
    segments: Vec<StatusSegment>,
    /// Horizontal padding at both ends, in physical pixels
    pub padding: f32,
    /// Gap between neighbouring segments, in physical pixels
    pub spacing: f32,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            segments: vec![
                StatusSegment::new(SegmentId::StatusMessage, SegmentContent::Empty),
                StatusSegment::new(
                    SegmentId::CharCount,
                    SegmentContent::Text(char_count_text(0)),
                ),
            ],
            padding: 8.0,
            spacing: 16.0,
        }
    }

    pub fn get_segment(&self, id: SegmentId) -> Option<&StatusSegment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Display text of a segment, empty when hidden
    pub fn segment_text(&self, id: SegmentId) -> &str {
        self.get_segment(id)
            .map_or("", |segment| segment.content.display_text())
    }

    pub fn update_segment(&mut self, id: SegmentId, content: SegmentContent) {
        if let Some(segment) = self.segments.iter_mut().find(|s| s.id == id) {
            segment.content = content;
        }
    }

    pub fn visible_segments(&self) -> impl Iterator<Item = &StatusSegment> {
        self.segments.iter().filter(|s| !s.content.is_empty())
    }
}

/// Refresh every segment from the model (called after each update)
pub fn sync_status_bar(model: &mut AppModel) {
    let count = char_count_text(model.document.char_count());
    model
        .ui
        .status_bar
        .update_segment(SegmentId::CharCount, SegmentContent::Text(count));

    let message = match &model.ui.transient_message {
        Some(msg) => SegmentContent::Text(msg.text.clone()),
        None => SegmentContent::Empty,
    };
    model
        .ui
        .status_bar
        .update_segment(SegmentId::StatusMessage, message);
}

/// A status message that clears itself after a while
#[derive(Debug, Clone)]
pub struct TransientMessage {
    pub text: String,
    pub expires_at: Instant,
}

impl TransientMessage {
    pub fn new(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

/// A segment placed for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSegment {
    pub id: SegmentId,
    /// Left edge in pixels from the bar's left edge
    pub x: f32,
    pub width: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct StatusBarLayout {
    pub left: Vec<RenderedSegment>,
    pub right: Vec<RenderedSegment>,
}

impl StatusBar {
    /// Place visible segments; `measure` returns the pixel width of a string
    ///
    /// Left segments flow from the left edge, right segments from the right
    /// edge. Left segments that would overlap the right ones are dropped.
    pub fn layout(&self, available_width: f32, measure: impl Fn(&str) -> f32) -> StatusBarLayout {
        let mut right = Vec::new();
        let mut right_x = available_width - self.padding;
        let right_segments: Vec<_> = self
            .visible_segments()
            .filter(|s| s.position == SegmentPosition::Right)
            .collect();
        for seg in right_segments.into_iter().rev() {
            let text = seg.content.display_text().to_string();
            let width = measure(&text);
            right_x -= width;
            right.push(RenderedSegment {
                id: seg.id,
                x: right_x.max(0.0),
                width,
                text,
            });
            right_x -= self.spacing;
        }
        right.reverse();
        let right_edge = right.first().map_or(available_width, |seg| seg.x);

        let mut left = Vec::new();
        let mut left_x = self.padding;
        for seg in self
            .visible_segments()
            .filter(|s| s.position == SegmentPosition::Left)
        {
            let text = seg.content.display_text().to_string();
            let width = measure(&text);
            if left_x + width > right_edge - self.spacing && !right.is_empty() {
                break;
            }
            left.push(RenderedSegment {
                id: seg.id,
                x: left_x,
                width,
                text,
            });
            left_x += width + self.spacing;
        }

        StatusBarLayout { left, right }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monospace(text: &str) -> f32 {
        text.chars().count() as f32 * 10.0
    }

    #[test]
    fn test_char_count_is_always_shown() {
        let bar = StatusBar::new();
        assert_eq!(bar.segment_text(SegmentId::CharCount), "Characters: 0");
        assert_eq!(bar.visible_segments().count(), 1);
    }

    #[test]
    fn test_layout_places_count_at_right_edge() {
        let bar = StatusBar::new();
        let layout = bar.layout(800.0, monospace);
        assert!(layout.left.is_empty());
        assert_eq!(layout.right.len(), 1);
        let count = &layout.right[0];
        assert_eq!(count.width, 130.0);
        assert_eq!(count.x + count.width, 800.0 - bar.padding);
    }

    #[test]
    fn test_layout_with_message_on_left() {
        let mut bar = StatusBar::new();
        bar.update_segment(
            SegmentId::StatusMessage,
            SegmentContent::Text("File saved successfully.".into()),
        );
        let layout = bar.layout(800.0, monospace);
        assert_eq!(layout.left.len(), 1);
        assert_eq!(layout.left[0].x, bar.padding);
        assert_eq!(layout.left[0].text, "File saved successfully.");
    }

    #[test]
    fn test_narrow_bar_drops_message_before_count() {
        let mut bar = StatusBar::new();
        bar.update_segment(
            SegmentId::StatusMessage,
            SegmentContent::Text("File saved successfully.".into()),
        );
        let layout = bar.layout(200.0, monospace);
        assert!(layout.left.is_empty());
        assert_eq!(layout.right[0].id, SegmentId::CharCount);
    }

    #[test]
    fn test_transient_message_expiry() {
        let msg = TransientMessage::new("hi", Duration::from_millis(3000));
        assert!(!msg.is_expired());
        assert!(msg.is_expired_at(msg.expires_at));
        assert!(msg.is_expired_at(Instant::now() + Duration::from_secs(4)));
    }
}
