//! Font loading, glyph caching and text line layout
//!
//! Faces are loaded from the font catalog the first time a family is used.
//! A family that fails to load falls back to the default face for the
//! rest of the session.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use anyhow::{anyhow, Result};
use fontdue::{Font, FontSettings, Metrics};

use quill::fonts::{FontCatalog, FontFace};
use quill::model::{Document, Rect, TextMetrics, TextStyle, Viewport};
use quill::util::{next_tab_stop, TAB_WIDTH};

use super::frame::{Frame, GlyphEffects};

pub type GlyphCacheKey = (char, u32);

pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// A parsed font file and the glyphs rasterized from it so far
pub struct LoadedFont {
    font: Font,
    glyphs: GlyphCache,
}

impl LoadedFont {
    fn load(face: &FontFace) -> Result<Self> {
        let bytes = std::fs::read(&face.path)
            .map_err(|e| anyhow!("Failed to read {}: {}", face.path.display(), e))?;
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow!("Failed to parse {}: {}", face.path.display(), e))?;
        Ok(Self {
            font,
            glyphs: GlyphCache::new(),
        })
    }

    /// Advance of `ch` at `px`, without rasterizing
    pub fn advance(&self, ch: char, px: f32) -> f32 {
        self.font.metrics(ch, px).advance_width
    }

    pub fn measure(&self, text: &str, px: f32) -> f32 {
        text.chars().map(|ch| self.advance(ch, px)).sum()
    }

    /// Distance from the top of a line box to the baseline, and below it
    pub fn ascent_descent(&self, px: f32) -> (f32, f32) {
        self.font
            .horizontal_line_metrics(px)
            .map_or((px * 0.8, px * 0.2), |m| (m.ascent, -m.descent))
    }

    /// Draw `text` starting at `x`; returns the x after the last glyph
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        frame: &mut Frame,
        text: &str,
        x: f32,
        baseline: f32,
        px: f32,
        color: u32,
        effects: GlyphEffects,
    ) -> f32 {
        let mut pen = x;
        for ch in text.chars() {
            let (metrics, bitmap) = self
                .glyphs
                .entry((ch, px.to_bits()))
                .or_insert_with(|| self.font.rasterize(ch, px));
            frame.draw_glyph(metrics, bitmap, pen, baseline, color, effects);
            pen += metrics.advance_width + bold_extra(effects);
        }
        pen
    }
}

/// Extra advance a synthesized bold glyph takes
fn bold_extra(effects: GlyphEffects) -> f32 {
    if effects.bold {
        1.0
    } else {
        0.0
    }
}

/// Faces by family name, loaded on demand
pub struct FontStore {
    fallback: LoadedFont,
    fallback_family: String,
    faces: HashMap<String, LoadedFont>,
    failed: HashSet<String>,
}

impl FontStore {
    /// Load the default face: `preferred`, then any family that parses
    pub fn new(catalog: &FontCatalog, preferred: Option<&str>) -> Result<Self> {
        let families = catalog.families();
        let candidates = catalog
            .default_family(preferred)
            .into_iter()
            .chain(families.iter().filter_map(|f| catalog.find(f)));

        for face in candidates {
            match LoadedFont::load(face) {
                Ok(font) => {
                    tracing::info!("Default font: {} ({})", face.family, face.path.display());
                    return Ok(Self {
                        fallback: font,
                        fallback_family: face.family.clone(),
                        faces: HashMap::new(),
                        failed: HashSet::new(),
                    });
                }
                Err(e) => tracing::warn!("{}", e),
            }
        }

        Err(anyhow!(
            "No usable font found; install a TrueType or OpenType font"
        ))
    }

    pub fn fallback_family(&self) -> &str {
        &self.fallback_family
    }

    /// Face used for window chrome
    pub fn ui(&self) -> &LoadedFont {
        &self.fallback
    }

    pub fn ui_mut(&mut self) -> &mut LoadedFont {
        &mut self.fallback
    }

    /// The face for `family`, or the default one
    pub fn face(&mut self, family: Option<&str>, catalog: &FontCatalog) -> &mut LoadedFont {
        let Some(family) = family.filter(|f| !f.eq_ignore_ascii_case(&self.fallback_family))
        else {
            return &mut self.fallback;
        };

        if !self.faces.contains_key(family) && !self.failed.contains(family) {
            match catalog.find(family).map(LoadedFont::load) {
                Some(Ok(font)) => {
                    tracing::debug!("Loaded font family {}", family);
                    self.faces.insert(family.to_string(), font);
                }
                Some(Err(e)) => {
                    tracing::warn!("{}; using {}", e, self.fallback_family);
                    self.failed.insert(family.to_string());
                }
                None => {
                    tracing::warn!("Font family {} is not installed", family);
                    self.failed.insert(family.to_string());
                }
            }
        }

        match self.faces.get_mut(family) {
            Some(font) => font,
            None => &mut self.fallback,
        }
    }
}

/// A stretch of one line drawn with a single style
#[derive(Debug, Clone)]
pub struct Span {
    /// Columns within the line
    pub columns: Range<usize>,
    pub text: String,
    pub style: TextStyle,
    pub px: f32,
}

impl Span {
    pub fn effects(&self) -> GlyphEffects {
        GlyphEffects {
            bold: self.style.bold,
            italic: self.style.italic,
        }
    }
}

/// A document line placed in the text area
#[derive(Debug, Clone)]
pub struct LineLayout {
    pub line: usize,
    pub top: f32,
    pub height: f32,
    pub baseline: f32,
    /// x of every column boundary, one more entry than the line has chars
    pub stops: Vec<f32>,
    pub spans: Vec<Span>,
}

impl LineLayout {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// x of the boundary before `column`, clamped to the line end
    pub fn column_x(&self, column: usize) -> f32 {
        let last = self.stops.len().saturating_sub(1);
        self.stops.get(column.min(last)).copied().unwrap_or_default()
    }

    /// Column boundary nearest to `x`
    pub fn column_at(&self, x: f32) -> usize {
        let after = self.stops.partition_point(|&stop| stop <= x);
        if after == 0 {
            return 0;
        }
        if after >= self.stops.len() {
            return self.stops.len() - 1;
        }
        let (left, right) = (self.stops[after - 1], self.stops[after]);
        if x - left < right - x {
            after - 1
        } else {
            after
        }
    }
}

/// Lay out the lines that fit in `area`, from the viewport's first line
/// and shifted left by its sideways scroll
pub fn layout_lines(
    fonts: &mut FontStore,
    catalog: &FontCatalog,
    document: &Document,
    metrics: &TextMetrics,
    viewport: &Viewport,
    area: Rect,
) -> Vec<LineLayout> {
    let mut lines = Vec::new();
    let mut y = area.y;
    let origin = area.x - viewport.scroll_x;

    for line in viewport.top_line..document.line_count() {
        if y >= area.bottom() && !lines.is_empty() {
            break;
        }
        let layout = layout_line(fonts, catalog, document, metrics, line, origin, y);
        y = layout.bottom();
        lines.push(layout);
    }

    lines
}

/// Lay out one document line with its left edge at `origin` and its top at `top`
///
/// Tabs get no glyph and no span: they only move the pen to the next tab
/// stop of the face in use.
pub fn layout_line(
    fonts: &mut FontStore,
    catalog: &FontCatalog,
    document: &Document,
    metrics: &TextMetrics,
    line: usize,
    origin: f32,
    top: f32,
) -> LineLayout {
    let height = metrics.line_height(document.line_max_size(line));
    let range = document.line_range(line);
    let text: Vec<char> = document.line_text(line).chars().collect();

    let mut stops = Vec::with_capacity(text.len() + 1);
    let mut spans = Vec::new();
    let mut x = origin;
    let mut ascent: f32 = 0.0;
    let mut descent: f32 = 0.0;
    let mut has_runs = false;
    stops.push(x);

    let line_start = range.start;
    for (run, style) in document.formats.iter_range(range.clone()) {
        has_runs = true;
        let columns = run.start - line_start..run.end - line_start;
        let px = metrics.font_px(style.size);
        let face = fonts.face(style.family.as_deref(), catalog);
        let (a, d) = face.ascent_descent(px);
        ascent = ascent.max(a);
        descent = descent.max(d);

        let extra = bold_extra(GlyphEffects {
            bold: style.bold,
            italic: style.italic,
        });
        let tab = face.advance(' ', px) * TAB_WIDTH as f32;

        let mut piece = columns.start;
        for column in columns.clone() {
            match text.get(column) {
                Some('\t') => {
                    push_span(&mut spans, &text, piece..column, style, px);
                    piece = column + 1;
                    x = origin + next_tab_stop(x - origin, tab);
                }
                Some(&ch) => x += face.advance(ch, px) + extra,
                None => {}
            }
            stops.push(x);
        }
        push_span(&mut spans, &text, piece..columns.end, style, px);
    }

    // An empty line still needs room for the cursor
    if !has_runs {
        let style = document.style_before(range.start);
        let (a, d) = fonts
            .face(style.family.as_deref(), catalog)
            .ascent_descent(metrics.font_px(style.size));
        ascent = a;
        descent = d;
    }

    let baseline = top + ((height - (ascent + descent)) / 2.0).max(0.0) + ascent;
    LineLayout {
        line,
        top,
        height,
        baseline: baseline.round(),
        stops,
        spans,
    }
}

fn push_span(
    spans: &mut Vec<Span>,
    text: &[char],
    columns: Range<usize>,
    style: &TextStyle,
    px: f32,
) {
    if columns.is_empty() {
        return;
    }
    spans.push(Span {
        text: text.get(columns.clone()).unwrap_or_default().iter().collect(),
        columns,
        style: style.clone(),
        px,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(stops: Vec<f32>) -> LineLayout {
        LineLayout {
            line: 0,
            top: 0.0,
            height: 20.0,
            baseline: 15.0,
            stops,
            spans: Vec::new(),
        }
    }

    #[test]
    fn test_column_at_rounds_to_nearest_boundary() {
        let layout = line(vec![10.0, 20.0, 30.0]);
        assert_eq!(layout.column_at(0.0), 0);
        assert_eq!(layout.column_at(14.0), 0);
        assert_eq!(layout.column_at(16.0), 1);
        assert_eq!(layout.column_at(26.0), 2);
        assert_eq!(layout.column_at(500.0), 2);
    }

    #[test]
    fn test_column_x_clamps_to_line_end() {
        let layout = line(vec![10.0, 20.0]);
        assert_eq!(layout.column_x(0), 10.0);
        assert_eq!(layout.column_x(7), 20.0);
    }

    #[test]
    fn test_empty_line_has_single_stop() {
        let layout = line(vec![6.0]);
        assert_eq!(layout.column_at(100.0), 0);
        assert_eq!(layout.column_x(0), 6.0);
    }
}
