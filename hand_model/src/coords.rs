//! Named coordinate-space conversions.
//!
//! Three spaces are in play every frame:
//!
//! * **normalized** — detector output, `[0,1]` × `[0,1]`, y down
//! * **pixel** — canvas space, `[0,w)` × `[0,h)`, y down
//! * **NDC** — camera space, `[-1,1]` × `[-1,1]`, y up
//!
//! Every conversion between them lives here, as a named function, rather
//! than inline at each call site.

use glam::Vec2;

/// Normalized frame position → canvas pixel position.
pub fn norm_to_pixel(p: Vec2, w: u32, h: u32) -> Vec2 {
    Vec2::new(p.x * w as f32, p.y * h as f32)
}

/// Canvas pixel position → normalized frame position.
pub fn pixel_to_norm(p: Vec2, w: u32, h: u32) -> Vec2 {
    Vec2::new(p.x / w as f32, p.y / h as f32)
}

/// Normalized frame position → normalized device coordinates.
/// NDC y grows upward, so the vertical axis flips.
pub fn norm_to_ndc(p: Vec2) -> Vec2 {
    Vec2::new(p.x * 2.0 - 1.0, -(p.y * 2.0 - 1.0))
}

/// Clamp a pixel position into canvas bounds.
///
/// The detector contract does not guarantee in-range coordinates; every
/// position must pass through here before touching a raster buffer.
pub fn clamp_to_canvas(p: Vec2, w: u32, h: u32) -> Vec2 {
    Vec2::new(
        p.x.clamp(0.0, (w.saturating_sub(1)) as f32),
        p.y.clamp(0.0, (h.saturating_sub(1)) as f32),
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
