//! # ink_surface
//!
//! A persistent 2D raster layer accumulating freehand strokes.
//!
//! Strokes arrive as individual line segments (one per detection frame,
//! from the previous fingertip position to the current one) and are
//! rasterized immediately; the accumulated pixels are the only record —
//! no stroke history is kept. Pixels are straight ARGB (`0xAARRGGBB`),
//! alpha 0 meaning transparent, so a compositor can blend the layer over
//! a video backdrop.
//!
//! Segments are drawn with round caps by stamping filled discs along the
//! segment path. Eraser segments clear pixels to fully transparent along
//! the same path instead of painting. The buffer is never reset
//! automatically — only by an explicit [`InkSurface::clear`].

use glam::Vec2;

// ════════════════════════════════════════════════════════════════════════════
// StrokeStyle
// ════════════════════════════════════════════════════════════════════════════

/// Tool attributes captured at the moment a segment is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Opaque ARGB pen color. Ignored when `eraser` is set.
    pub color: u32,
    /// Stroke width in pixels (minimum 1).
    pub width: u32,
    /// Erase instead of paint.
    pub eraser: bool,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        // The toolbar's starting state: blue pen, 5 px.
        StrokeStyle {
            color: 0xFF3B82F6,
            width: 5,
            eraser: false,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// InkSurface
// ════════════════════════════════════════════════════════════════════════════

/// The accumulated stroke raster, sized to the video frame.
#[derive(Clone, Debug)]
pub struct InkSurface {
    width: u32,
    height: u32,
    pix: Vec<u32>,
}

impl InkSurface {
    /// A fully transparent buffer of `width` × `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        InkSurface {
            width,
            height,
            pix: vec![0; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw ARGB buffer, row-major, for compositing.
    pub fn pixels(&self) -> &[u32] {
        &self.pix
    }

    /// Append one round-cap segment from `from` to `to` (pixel
    /// coordinates). Eraser styles clear instead of painting.
    ///
    /// Positions outside the buffer are handled pixel-by-pixel: the
    /// segment is walked as given and out-of-bounds writes are skipped,
    /// never wrapped.
    pub fn draw_segment(&mut self, from: Vec2, to: Vec2, style: &StrokeStyle) {
        let radius = (style.width.max(1) as f32) / 2.0;
        let value = if style.eraser { 0 } else { style.color | 0xFF00_0000 };

        // Disc stamps at 1-px steps cover the path and give the caps.
        let span = to - from;
        let steps = span.length().ceil().max(1.0) as u32;
        for i in 0..=steps {
            let center = from + span * (i as f32 / steps as f32);
            self.stamp_disc(center, radius, value);
        }
    }

    /// Wipe the whole buffer. Idempotent.
    pub fn clear(&mut self) {
        self.pix.fill(0);
    }

    /// Number of non-transparent pixels; handy for tests and demos.
    pub fn coverage(&self) -> usize {
        self.pix.iter().filter(|&&p| p >> 24 != 0).count()
    }

    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        if x < self.width && y < self.height {
            self.pix[(y * self.width + x) as usize]
        } else {
            0
        }
    }

    fn stamp_disc(&mut self, center: Vec2, radius: f32, value: u32) {
        let r2 = radius * radius;
        let x0 = (center.x - radius).floor().max(0.0) as i64;
        let x1 = (center.x + radius).ceil().min(self.width as f32 - 1.0) as i64;
        let y0 = (center.y - radius).floor().max(0.0) as i64;
        let y1 = (center.y + radius).ceil().min(self.height as f32 - 1.0) as i64;
        if x1 < x0 || y1 < y0 {
            return;
        }
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - center.x;
                let dy = y as f32 - center.y;
                if dx * dx + dy * dy <= r2 {
                    self.pix[y as usize * self.width as usize + x as usize] = value;
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
