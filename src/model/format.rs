//! Character formatting
//!
//! A [`TextStyle`] is the fully resolved look of a character. A
//! [`CharFormat`] is a partial style: only the attributes it sets are merged
//! into existing text, everything else is left alone. [`FormatRuns`] stores
//! the styles of a document as contiguous runs that tile `[0, len)`.

use std::ops::Range;

use crate::theme::Color;

pub const MIN_FONT_SIZE: u32 = 8;
pub const MAX_FONT_SIZE: u32 = 29;
pub const DEFAULT_FONT_SIZE: u32 = 12;

/// A point size from the closed set offered by the size dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontSize(u32);

impl FontSize {
    /// Returns `None` for sizes outside 8..=29
    pub fn new(points: u32) -> Option<Self> {
        (MIN_FONT_SIZE..=MAX_FONT_SIZE)
            .contains(&points)
            .then_some(Self(points))
    }

    /// Clamp an arbitrary size into the allowed range
    pub fn clamped(points: u32) -> Self {
        Self(points.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE))
    }

    pub fn points(self) -> u32 {
        self.0
    }

    /// Every selectable size, smallest first
    pub fn all() -> impl Iterator<Item = FontSize> {
        (MIN_FONT_SIZE..=MAX_FONT_SIZE).map(FontSize)
    }

    /// Position in [`FontSize::all`]
    pub fn index(self) -> usize {
        (self.0 - MIN_FONT_SIZE) as usize
    }

    /// Step by `delta` sizes, saturating at both ends
    pub fn step(self, delta: i32) -> Self {
        let points = (self.0 as i64 + delta as i64).max(0) as u32;
        Self::clamped(points)
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(DEFAULT_FONT_SIZE)
    }
}

impl std::fmt::Display for FontSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fully resolved style of a character
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStyle {
    /// `None` renders with the default face
    pub family: Option<String>,
    pub size: FontSize,
    pub bold: bool,
    pub italic: bool,
    /// `None` renders with the theme foreground
    pub color: Option<Color>,
}

impl TextStyle {
    pub fn with_size(size: FontSize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}

/// The result of confirming the font picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontChoice {
    pub family: String,
    pub size: FontSize,
    pub bold: bool,
    pub italic: bool,
}

/// A partial style merged into a range of text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharFormat {
    pub family: Option<String>,
    pub size: Option<FontSize>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub color: Option<Color>,
}

impl CharFormat {
    pub fn bold(bold: bool) -> Self {
        Self {
            bold: Some(bold),
            ..Self::default()
        }
    }

    pub fn italic(italic: bool) -> Self {
        Self {
            italic: Some(italic),
            ..Self::default()
        }
    }

    pub fn size(size: FontSize) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// Family, size and style from the font picker
    pub fn font(choice: &FontChoice) -> Self {
        Self {
            family: Some(choice.family.clone()),
            size: Some(choice.size),
            bold: Some(choice.bold),
            italic: Some(choice.italic),
            color: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Produce `style` with every attribute this format sets replaced
    pub fn apply_to(&self, style: &TextStyle) -> TextStyle {
        TextStyle {
            family: self.family.clone().or_else(|| style.family.clone()),
            size: self.size.unwrap_or(style.size),
            bold: self.bold.unwrap_or(style.bold),
            italic: self.italic.unwrap_or(style.italic),
            color: self.color.or(style.color),
        }
    }
}

/// A run of characters sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRun {
    pub range: Range<usize>,
    pub style: TextStyle,
}

/// Styles of a document as sorted, non-empty, coalesced runs
///
/// The runs always tile `[0, len)`: the first starts at 0, each starts where
/// the previous ended, the last ends at `len`, and no two neighbours share a
/// style. An empty document has no runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatRuns {
    runs: Vec<FormatRun>,
    len: usize,
}

impl FormatRuns {
    /// Runs for `len` characters all in `style`
    pub fn new(len: usize, style: TextStyle) -> Self {
        let runs = if len == 0 {
            Vec::new()
        } else {
            vec![FormatRun {
                range: 0..len,
                style,
            }]
        };
        Self { runs, len }
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn runs(&self) -> &[FormatRun] {
        &self.runs
    }

    /// Discard every run and cover `len` characters with `style`
    pub fn reset(&mut self, len: usize, style: TextStyle) {
        *self = Self::new(len, style);
    }

    /// Index of the run containing `offset` (which must be < len)
    fn run_index(&self, offset: usize) -> Option<usize> {
        if offset >= self.len {
            return None;
        }
        let idx = self.runs.partition_point(|run| run.range.end <= offset);
        (idx < self.runs.len()).then_some(idx)
    }

    /// Style of the character at `offset`
    pub fn style_at(&self, offset: usize) -> Option<&TextStyle> {
        self.run_index(offset).map(|idx| &self.runs[idx].style)
    }

    /// Runs clipped to `range`, in order
    pub fn iter_range(&self, range: Range<usize>) -> impl Iterator<Item = (Range<usize>, &TextStyle)> {
        let start = range.start.min(self.len);
        let end = range.end.min(self.len);
        let first = self.runs.partition_point(|run| run.range.end <= start);
        self.runs[first..]
            .iter()
            .take_while(move |run| run.range.start < end)
            .map(move |run| {
                (
                    run.range.start.max(start)..run.range.end.min(end),
                    &run.style,
                )
            })
    }

    /// Make sure a run boundary exists at `offset`
    fn split_at(&mut self, offset: usize) {
        let Some(idx) = self.run_index(offset) else {
            return;
        };
        let run = &mut self.runs[idx];
        if run.range.start == offset {
            return;
        }
        let tail = FormatRun {
            range: offset..run.range.end,
            style: run.style.clone(),
        };
        run.range.end = offset;
        self.runs.insert(idx + 1, tail);
    }

    /// Join neighbouring runs with identical styles
    fn coalesce(&mut self) {
        let mut merged: Vec<FormatRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.style == run.style => prev.range.end = run.range.end,
                _ => merged.push(run),
            }
        }
        self.runs = merged;
        self.debug_check();
    }

    /// Merge `format` into every character of `range`
    pub fn merge(&mut self, range: Range<usize>, format: &CharFormat) {
        let start = range.start.min(self.len);
        let end = range.end.min(self.len);
        if start >= end || format.is_empty() {
            return;
        }
        self.split_at(start);
        self.split_at(end);
        for run in &mut self.runs {
            if run.range.start >= start && run.range.end <= end {
                run.style = format.apply_to(&run.style);
            }
        }
        self.coalesce();
    }

    /// Account for `count` characters inserted at `offset` in `style`
    pub fn insert(&mut self, offset: usize, count: usize, style: TextStyle) {
        if count == 0 {
            return;
        }
        let offset = offset.min(self.len);
        self.split_at(offset);
        let idx = self.runs.partition_point(|run| run.range.start < offset);
        for run in &mut self.runs[idx..] {
            run.range.start += count;
            run.range.end += count;
        }
        self.runs.insert(
            idx,
            FormatRun {
                range: offset..offset + count,
                style,
            },
        );
        self.len += count;
        self.coalesce();
    }

    /// Account for the characters of `range` being deleted
    pub fn remove(&mut self, range: Range<usize>) {
        let start = range.start.min(self.len);
        let end = range.end.min(self.len);
        if start >= end {
            return;
        }
        let count = end - start;
        self.split_at(start);
        self.split_at(end);
        self.runs
            .retain(|run| !(run.range.start >= start && run.range.end <= end));
        for run in &mut self.runs {
            if run.range.start >= end {
                run.range.start -= count;
                run.range.end -= count;
            }
        }
        self.len -= count;
        self.coalesce();
    }

    /// Assert the runs describe a text of `text_len` characters
    pub fn debug_assert_tiles(&self, text_len: usize) {
        debug_assert_eq!(
            self.len, text_len,
            "format runs out of step with the text"
        );
        self.debug_check();
    }

    fn debug_check(&self) {
        debug_assert!(
            self.runs.first().map_or(true, |run| run.range.start == 0),
            "first run must start at 0"
        );
        debug_assert!(
            self.runs.windows(2).all(|pair| pair[0].range.end == pair[1].range.start),
            "runs must be contiguous"
        );
        debug_assert!(
            self.runs.iter().all(|run| !run.range.is_empty()),
            "runs must be non-empty"
        );
        debug_assert_eq!(
            self.runs.last().map_or(0, |run| run.range.end),
            self.len,
            "runs must cover the whole document"
        );
    }
}
