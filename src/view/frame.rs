//! Frame abstraction for drawing primitives
//!
//! Wraps the window's pixel buffer with clipped fills, alpha blending and
//! glyph blitting so the rest of the view never indexes the buffer itself.

use fontdue::Metrics;
use quill::model::Rect;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are ARGB (0xAARRGGBB); `alpha` is the coverage in 0..=1.
/// The result is opaque.
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let channel = |shift: u32| {
        let b = ((bg >> shift) & 0xFF) as f32;
        let f = ((fg >> shift) & 0xFF) as f32;
        ((b * (1.0 - alpha) + f * alpha) as u32).min(0xFF)
    };

    0xFF000000 | (channel(16) << 16) | (channel(8) << 8) | channel(0)
}

/// Horizontal shear applied to italic glyphs, in pixels per pixel of height
const ITALIC_SHEAR: f32 = 0.2;

/// Synthesized style for a glyph whose font has no such face
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphEffects {
    /// Draw a second pass one pixel to the right
    pub bold: bool,
    /// Lean the glyph to the right around its baseline
    pub italic: bool,
}

/// Clipping rectangle in pixel coordinates (inclusive start, exclusive end).
#[derive(Clone, Copy, Debug)]
struct ClipRect {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

/// A frame buffer wrapper providing safe drawing primitives.
///
/// All coordinates are in pixels. Out-of-bounds operations are clipped.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    clip: Option<ClipRect>,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, the height shrinks to
    /// what the buffer holds.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let height = if width > 0 {
            height.min(buffer.len() / width)
        } else {
            0
        };

        Self {
            buffer,
            width,
            height,
            clip: None,
        }
    }

    /// Restrict drawing to `rect` until [`Frame::clear_clip`]
    pub fn set_clip(&mut self, rect: Rect) {
        let (x0, y0, x1, y1) = self.bounds(rect);
        self.clip = Some(ClipRect { x0, y0, x1, y1 });
    }

    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    /// Pixel bounds of `rect` clamped to the frame (not the clip)
    fn bounds(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let x0 = (rect.x.max(0.0) as usize).min(self.width);
        let y0 = (rect.y.max(0.0) as usize).min(self.height);
        let x1 = (rect.right().max(0.0) as usize).min(self.width);
        let y1 = (rect.bottom().max(0.0) as usize).min(self.height);
        (x0, y0, x1, y1)
    }

    /// Pixel bounds of `rect` clamped to the frame and the clip
    fn clipped(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let (x0, y0, x1, y1) = self.bounds(rect);
        match self.clip {
            Some(c) => (x0.max(c.x0), y0.max(c.y0), x1.min(c.x1), y1.min(c.y1)),
            None => (x0, y0, x1, y1),
        }
    }

    #[inline]
    fn in_clip(&self, x: usize, y: usize) -> bool {
        let (x0, y0, x1, y1) = match self.clip {
            Some(c) => (c.x0, c.y0, c.x1, c.y1),
            None => (0, 0, self.width, self.height),
        };
        x >= x0 && x < x1 && y >= y0 && y < y1
    }

    /// Clear the entire buffer with a solid color
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let (x0, y0, x1, y1) = self.clipped(rect);
        for y in y0..y1 {
            let row = y * self.width;
            self.buffer[row + x0..row + x1].fill(color);
        }
    }

    /// Fill a rectangle, blending by the color's alpha channel
    pub fn blend_rect(&mut self, rect: Rect, color: u32) {
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            return self.fill_rect(rect, color);
        }

        let (x0, y0, x1, y1) = self.clipped(rect);
        for y in y0..y1 {
            let row = y * self.width;
            for px in &mut self.buffer[row + x0..row + x1] {
                *px = blend_colors(*px, color, alpha);
            }
        }
    }

    /// Outline `rect` with a 1px border
    pub fn stroke_rect(&mut self, rect: Rect, color: u32) {
        let Rect {
            x,
            y,
            width,
            height,
        } = rect;
        self.fill_rect(Rect::new(x, y, width, 1.0), color);
        self.fill_rect(Rect::new(x, rect.bottom() - 1.0, width, 1.0), color);
        self.fill_rect(Rect::new(x, y, 1.0, height), color);
        self.fill_rect(Rect::new(rect.right() - 1.0, y, 1.0, height), color);
    }

    /// Filled rectangle with a 1px border
    pub fn draw_bordered_rect(&mut self, rect: Rect, fill: u32, border: u32) {
        self.fill_rect(rect, fill);
        self.stroke_rect(rect, border);
    }

    /// Small downward-pointing triangle centered in `rect`
    pub fn draw_down_arrow(&mut self, rect: Rect, color: u32) {
        let half = (rect.width.min(rect.height) / 4.0).floor().max(2.0);
        let cx = rect.x + rect.width / 2.0;
        let top = rect.y + (rect.height - half) / 2.0;
        for row in 0..half as usize {
            let w = half - row as f32;
            self.fill_rect(Rect::new(cx - w, top + row as f32, 2.0 * w, 1.0), color);
        }
    }

    /// Blend a pixel with alpha coverage
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: u32, alpha: f32) {
        if !self.in_clip(x, y) {
            return;
        }
        let idx = y * self.width + x;
        self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
    }

    /// Get a single pixel (returns 0 if out of bounds)
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }

    /// Blit a rasterized glyph with its origin at (`x`, `baseline`)
    pub fn draw_glyph(
        &mut self,
        metrics: &Metrics,
        bitmap: &[u8],
        x: f32,
        baseline: f32,
        color: u32,
        effects: GlyphEffects,
    ) {
        let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

        for by in 0..metrics.height {
            let py = glyph_top + by as f32;
            if py < 0.0 {
                continue;
            }
            let shear = if effects.italic {
                ((baseline - py) * ITALIC_SHEAR).round()
            } else {
                0.0
            };

            for bx in 0..metrics.width {
                let Some(&coverage) = bitmap.get(by * metrics.width + bx) else {
                    continue;
                };
                if coverage == 0 {
                    continue;
                }
                let px = x + metrics.xmin as f32 + bx as f32 + shear;
                if px < 0.0 {
                    continue;
                }
                let alpha = coverage as f32 / 255.0;
                self.blend_pixel(px as usize, py as usize, color, alpha);
                if effects.bold {
                    self.blend_pixel(px as usize + 1, py as usize, color, alpha);
                }
            }
        }
    }
}
