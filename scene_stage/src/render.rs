//! Software rasterizer: primitives → transparent RGBA overlay.
//!
//! No GPU, no meshes. Models are described as spheres, camera-facing
//! discs, and thick 3D segments; the renderer painter-sorts them by
//! distance from the camera and rasterizes back-to-front into a reusable
//! `Vec<u32>` with alpha-0 background. Spheres get a simple lambert
//! shade from one directional light plus an ambient floor.

use glam::{Vec2, Vec3};

use crate::camera::Camera;

/// Lamp position: high, right, and toward the viewer.
const LIGHT_POS: Vec3 = Vec3::new(5.0, 5.0, 5.0);

/// Ambient floor so unlit faces stay readable.
const AMBIENT: f32 = 0.45;

// ════════════════════════════════════════════════════════════════════════════
// Prim
// ════════════════════════════════════════════════════════════════════════════

/// One renderable primitive in world space.
#[derive(Clone, Copy, Debug)]
pub enum Prim {
    /// Shaded ball. `emissive` skips shading (the sun).
    Sphere {
        center: Vec3,
        radius: f32,
        color: u32,
        emissive: bool,
    },
    /// Flat camera-facing circle (iris, pupil).
    Disc { center: Vec3, radius: f32, color: u32 },
    /// Thick line between two world points (rays, tubes, slab edges).
    /// `width` is in world units at the segment's depth.
    Segment {
        a: Vec3,
        b: Vec3,
        width: f32,
        color: u32,
    },
}

impl Prim {
    /// Representative point for the painter sort.
    fn anchor(&self) -> Vec3 {
        match *self {
            Prim::Sphere { center, .. } | Prim::Disc { center, .. } => center,
            Prim::Segment { a, b, .. } => (a + b) * 0.5,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SceneRenderer
// ════════════════════════════════════════════════════════════════════════════

/// Rasterizes a primitive list into an owned, reused overlay buffer.
pub struct SceneRenderer {
    width: u32,
    height: u32,
    pix: Vec<u32>,
}

impl SceneRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        SceneRenderer {
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

    /// Render one frame. The returned slice is valid until the next call.
    pub fn render(&mut self, prims: &[Prim], camera: &Camera) -> &[u32] {
        self.pix.fill(0);

        let mut order: Vec<(f32, &Prim)> = prims
            .iter()
            .map(|p| (camera.position.distance(p.anchor()), p))
            .collect();
        // Far-to-near: later draws overwrite earlier ones.
        order.sort_by(|a, b| b.0.total_cmp(&a.0));

        for (_, prim) in order {
            match *prim {
                Prim::Sphere {
                    center,
                    radius,
                    color,
                    emissive,
                } => self.draw_sphere(camera, center, radius, color, emissive),
                Prim::Disc {
                    center,
                    radius,
                    color,
                } => self.draw_disc(camera, center, radius, color),
                Prim::Segment { a, b, width, color } => {
                    self.draw_segment(camera, a, b, width, color)
                }
            }
        }
        &self.pix
    }

    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        if x < self.width && y < self.height {
            self.pix[(y * self.width + x) as usize]
        } else {
            0
        }
    }

    // ── projection helpers ───────────────────────────────────────────────

    fn to_screen(&self, ndc: Vec3) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
        )
    }

    /// Screen-space radius of a world-space radius at `center`'s depth.
    fn projected_radius(&self, camera: &Camera, center: Vec3, radius: f32) -> Option<f32> {
        let c = self.to_screen(camera.project(center)?);
        let e = self.to_screen(camera.project(center + Vec3::X * radius)?);
        Some(c.distance(e).max(1.0))
    }

    // ── primitive rasterizers ────────────────────────────────────────────

    fn draw_sphere(&mut self, camera: &Camera, center: Vec3, radius: f32, color: u32, emissive: bool) {
        let Some(ndc) = camera.project(center) else {
            return;
        };
        let c = self.to_screen(ndc);
        let Some(r) = self.projected_radius(camera, center, radius) else {
            return;
        };

        let light = (LIGHT_POS - center).normalize();
        let (x0, x1, y0, y1) = self.clip_box(c, r);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let nx = (x as f32 - c.x) / r;
                let ny = -(y as f32 - c.y) / r;
                let d2 = nx * nx + ny * ny;
                if d2 > 1.0 {
                    continue;
                }
                let shade = if emissive {
                    1.0
                } else {
                    let n = Vec3::new(nx, ny, (1.0 - d2).sqrt());
                    (AMBIENT + (1.0 - AMBIENT) * n.dot(light).max(0.0)).min(1.0)
                };
                self.put(x, y, scale_color(color, shade));
            }
        }
    }

    fn draw_disc(&mut self, camera: &Camera, center: Vec3, radius: f32, color: u32) {
        let Some(ndc) = camera.project(center) else {
            return;
        };
        let c = self.to_screen(ndc);
        let Some(r) = self.projected_radius(camera, center, radius) else {
            return;
        };
        self.fill_circle(c, r, color);
    }

    fn draw_segment(&mut self, camera: &Camera, a: Vec3, b: Vec3, width: f32, color: u32) {
        let (Some(a_ndc), Some(b_ndc)) = (camera.project(a), camera.project(b)) else {
            return;
        };
        let pa = self.to_screen(a_ndc);
        let pb = self.to_screen(b_ndc);
        let r = self
            .projected_radius(camera, (a + b) * 0.5, width * 0.5)
            .unwrap_or(1.0);

        let span = pb - pa;
        let steps = span.length().ceil().max(1.0) as u32;
        for i in 0..=steps {
            self.fill_circle(pa + span * (i as f32 / steps as f32), r, color);
        }
    }

    // ── pixel helpers ────────────────────────────────────────────────────

    fn clip_box(&self, c: Vec2, r: f32) -> (i64, i64, i64, i64) {
        (
            (c.x - r).floor().max(0.0) as i64,
            (c.x + r).ceil().min(self.width as f32 - 1.0) as i64,
            (c.y - r).floor().max(0.0) as i64,
            (c.y + r).ceil().min(self.height as f32 - 1.0) as i64,
        )
    }

    fn fill_circle(&mut self, c: Vec2, r: f32, color: u32) {
        let (x0, x1, y0, y1) = self.clip_box(c, r);
        let r2 = r * r;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - c.x;
                let dy = y as f32 - c.y;
                if dx * dx + dy * dy <= r2 {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn put(&mut self, x: i64, y: i64, color: u32) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            self.pix[y as usize * self.width as usize + x as usize] = color;
        }
    }
}

/// Scale the RGB channels of an opaque ARGB color, keeping it opaque.
fn scale_color(c: u32, k: f32) -> u32 {
    let k = k.clamp(0.0, 1.0);
    let r = (((c >> 16) & 0xFF) as f32 * k) as u32;
    let g = (((c >> 8) & 0xFF) as f32 * k) as u32;
    let b = ((c & 0xFF) as f32 * k) as u32;
    0xFF00_0000 | (r << 16) | (g << 8) | b
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
