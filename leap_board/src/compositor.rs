//! Windowed compositor using `minifb`.
//!
//! Every tick the visible frame is assembled back-to-front in a fixed
//! order — video backdrop, ink layer, 3D overlay, gesture cursor — so
//! ink and models always sit above the video and the cursor is always on
//! top. Below the canvas, a status bar and key legend.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  video backdrop                              │
//! │    + ink layer                               │
//! │      + 3D overlay            ◯ cursor        │
//! ├──────────────────────────────────────────────┤
//! │ ● status text               tool readout     │
//! │ key legend                                   │
//! └──────────────────────────────────────────────┘
//! ```

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use glam::Vec2;
use hand_model::Gesture;
use ink_surface::InkSurface;
use scene_stage::ModelKind;

use std::sync::mpsc::Sender;

use crate::app::UiCommand;
use crate::hand::PointerState;
use crate::router::ToolState;

// ════════════════════════════════════════════════════════════════════════════
// Layout and palette constants
// ════════════════════════════════════════════════════════════════════════════

/// Height of the status/legend panel below the canvas.
pub const PANEL_H: u32 = 56;

const PANEL_BG: u32 = 0xFF0F3460;
const BACKDROP_TOP: u32 = 0xFF232A3D;
const BACKDROP_BOTTOM: u32 = 0xFF10141F;
const CURSOR_PINCH: u32 = 0xFFFFEE00;
const CURSOR_RING: u32 = 0xFFFFFFFF;

/// Pen colors offered by the toolbar, keys 1–4.
pub const PALETTE: [(&str, u32); 4] = [
    ("blue", 0xFF3B82F6),
    ("red", 0xFFEF4444),
    ("green", 0xFF22C55E),
    ("yellow", 0xFFEAB308),
];

/// Status-dot color per gesture (green = drawing, yellow = moving,
/// blue = hovering, gray = no hand).
fn indicator_color(gesture: Gesture) -> u32 {
    match gesture {
        Gesture::Point => 0xFF22C55E,
        Gesture::Pinch => 0xFFEAB308,
        Gesture::Hover => 0xFF60A5FA,
        Gesture::None => 0xFF6B7280,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Compositor
// ════════════════════════════════════════════════════════════════════════════

pub struct Compositor {
    window: Window,
    buf: Vec<u32>,
    canvas_w: u32,
    canvas_h: u32,
    backdrop: Vec<u32>,
    pointer_tx: Sender<PointerState>,
}

impl Compositor {
    pub fn new(canvas_w: u32, canvas_h: u32, pointer_tx: Sender<PointerState>) -> Result<Self, String> {
        let win_h = canvas_h + PANEL_H;
        let mut window = Window::new(
            "Leap Board — Gesture Whiteboard",
            canvas_w as usize,
            win_h as usize,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Compositor {
            window,
            buf: vec![0; (canvas_w * win_h) as usize],
            canvas_w,
            canvas_h,
            backdrop: make_backdrop(canvas_w, canvas_h),
            pointer_tx,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll window input: toolbar keys become [`UiCommand`]s and the
    /// pointer snapshot is forwarded to the simulation hand source.
    pub fn poll_input(&mut self) -> Vec<UiCommand> {
        let mut cmds = Vec::new();
        if !self.window.is_open() {
            cmds.push(UiCommand::Quit);
            return cmds;
        }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        let held = |k: Key| self.window.is_key_pressed(k, KeyRepeat::Yes);

        if one_shot(Key::Q) || one_shot(Key::Escape) {
            cmds.push(UiCommand::Quit);
        }
        for (i, key) in [Key::Key1, Key::Key2, Key::Key3, Key::Key4].iter().enumerate() {
            if one_shot(*key) {
                cmds.push(UiCommand::SetColor(PALETTE[i].1));
            }
        }
        for (kind, key) in [
            (ModelKind::Solar, Key::Key5),
            (ModelKind::Heart, Key::Key6),
            (ModelKind::Eye, Key::Key7),
            (ModelKind::Physics, Key::Key8),
        ] {
            if one_shot(key) {
                cmds.push(UiCommand::SelectModel(kind));
            }
        }
        if one_shot(Key::E) {
            cmds.push(UiCommand::ToggleEraser);
        }
        if one_shot(Key::C) {
            cmds.push(UiCommand::ClearInk);
        }
        if one_shot(Key::M) {
            cmds.push(UiCommand::CycleModel);
        }
        if held(Key::Minus) {
            cmds.push(UiCommand::AdjustWidth(-1));
        }
        if held(Key::Equal) {
            cmds.push(UiCommand::AdjustWidth(1));
        }

        // Pointer snapshot → simulated hand. The receiver is gone in
        // hardware mode; that is fine.
        let (mx, my) = self.window.get_mouse_pos(MouseMode::Clamp).unwrap_or((0.0, 0.0));
        let pointer = PointerState {
            pos: Vec2::new(
                (mx / self.canvas_w as f32).clamp(0.0, 1.0),
                (my / self.canvas_h as f32).clamp(0.0, 1.0),
            ),
            draw_held: self.window.get_mouse_down(MouseButton::Left),
            grab_held: self.window.get_mouse_down(MouseButton::Right)
                || self.window.is_key_down(Key::Space),
            hidden: self.window.is_key_down(Key::H),
        };
        let _ = self.pointer_tx.send(pointer);

        cmds
    }

    // ── frame assembly ────────────────────────────────────────────────────

    /// Composite and present one frame.
    ///
    /// A failed present is fatal for the session — the error is returned
    /// so the loop stops with a diagnostic instead of drawing garbage.
    pub fn render(
        &mut self,
        ink: &InkSurface,
        scene: &[u32],
        gesture: Gesture,
        cursor: Option<Vec2>,
        tools: &ToolState,
        model: Option<ModelKind>,
        status: &str,
    ) -> Result<(), String> {
        // 1. video backdrop
        self.buf[..self.backdrop.len()].copy_from_slice(&self.backdrop);

        // 2. ink layer
        self.blit_overlay(ink.pixels());

        // 3. 3D overlay
        self.blit_overlay(scene);

        // 4. gesture cursor, always topmost
        if let Some(pos) = cursor {
            self.draw_cursor(pos, gesture, tools);
        }

        // ── status panel ─────────────────────────────────────────────────
        let panel_y = self.canvas_h as usize;
        self.fill_rect(0, panel_y, self.canvas_w as usize, PANEL_H as usize, PANEL_BG);
        self.fill_circle(Vec2::new(13.0, panel_y as f32 + 14.0), 5.0, indicator_color(gesture));
        self.draw_label(status, 26, panel_y + 10, 0xFFEEEEEE);

        // Tool readout on the right: swatch, width, model.
        let rx = self.canvas_w as usize - 190;
        let swatch = if tools.eraser { 0xFFFFFFFF } else { tools.color };
        self.fill_rect(rx, panel_y + 8, 12, 12, swatch);
        let readout = if tools.eraser {
            format!("eraser w={}", tools.width)
        } else {
            format!("pen w={}", tools.width)
        };
        self.draw_label(&readout, rx + 18, panel_y + 10, 0xFFAADDFF);
        if let Some(kind) = model {
            self.draw_label(kind.label(), rx + 18, panel_y + 22, 0xFFFFBBAA);
        }

        // ── key legend ───────────────────────────────────────────────────
        self.draw_label(
            "lmb=draw  rmb/space=pinch  h=hide hand  1-4=color  e=eraser  -/+=width  c=clear  m=model  q=quit",
            10,
            panel_y + 40,
            0xFF888888,
        );

        let w = self.canvas_w as usize;
        let h = (self.canvas_h + PANEL_H) as usize;
        self.window
            .update_with_buffer(&self.buf, w, h)
            .map_err(|e| format!("lost the window surface: {}", e))
    }

    /// Overwrite canvas pixels wherever the overlay has alpha.
    fn blit_overlay(&mut self, overlay: &[u32]) {
        let n = overlay.len().min((self.canvas_w * self.canvas_h) as usize);
        for (i, &p) in overlay[..n].iter().enumerate() {
            if p >> 24 != 0 {
                self.buf[i] = p;
            }
        }
    }

    fn draw_cursor(&mut self, pos: Vec2, gesture: Gesture, tools: &ToolState) {
        match gesture {
            Gesture::Point => {
                let fill = if tools.eraser { 0xFFFFFFFF } else { tools.color };
                self.fill_circle(pos, 10.0, fill);
                self.draw_ring(pos, 10.0, 2.0, CURSOR_RING);
            }
            Gesture::Pinch => {
                self.fill_circle(pos, 10.0, CURSOR_PINCH);
                self.draw_ring(pos, 10.0, 2.0, CURSOR_RING);
            }
            Gesture::Hover => {
                // Translucent ring: blend instead of overwrite.
                self.blend_ring(pos, 10.0, 2.0, CURSOR_RING, 0.5);
            }
            Gesture::None => {}
        }
    }

    // ── primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        let bw = self.canvas_w as usize;
        let bh = (self.canvas_h + PANEL_H) as usize;
        for row in y..(y + h).min(bh) {
            for col in x..(x + w).min(bw) {
                self.buf[row * bw + col] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        let bw = self.canvas_w as usize;
        let bh = (self.canvas_h + PANEL_H) as usize;
        if x < bw && y < bh {
            self.buf[y * bw + x] = color;
        }
    }

    fn fill_circle(&mut self, c: Vec2, r: f32, color: u32) {
        let (x0, x1, y0, y1) = self.circle_box(c, r);
        let r2 = r * r;
        let bw = self.canvas_w as usize;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - c.x;
                let dy = y as f32 - c.y;
                if dx * dx + dy * dy <= r2 {
                    self.buf[y * bw + x] = color;
                }
            }
        }
    }

    fn draw_ring(&mut self, c: Vec2, r: f32, thickness: f32, color: u32) {
        let (x0, x1, y0, y1) = self.circle_box(c, r);
        let r2 = r * r;
        let inner = (r - thickness).max(0.0);
        let inner2 = inner * inner;
        let bw = self.canvas_w as usize;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - c.x;
                let dy = y as f32 - c.y;
                let d2 = dx * dx + dy * dy;
                if d2 <= r2 && d2 >= inner2 {
                    self.buf[y * bw + x] = color;
                }
            }
        }
    }

    fn blend_ring(&mut self, c: Vec2, r: f32, thickness: f32, color: u32, t: f32) {
        let (x0, x1, y0, y1) = self.circle_box(c, r);
        let r2 = r * r;
        let inner = (r - thickness).max(0.0);
        let inner2 = inner * inner;
        let bw = self.canvas_w as usize;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - c.x;
                let dy = y as f32 - c.y;
                let d2 = dx * dx + dy * dy;
                if d2 <= r2 && d2 >= inner2 {
                    let idx = y * bw + x;
                    self.buf[idx] = blend(self.buf[idx], color, t);
                }
            }
        }
    }

    fn circle_box(&self, c: Vec2, r: f32) -> (usize, usize, usize, usize) {
        let bw = self.canvas_w as usize;
        let bh = (self.canvas_h + PANEL_H) as usize;
        (
            (c.x - r).floor().max(0.0) as usize,
            ((c.x + r).ceil() as usize).min(bw.saturating_sub(1)),
            (c.y - r).floor().max(0.0) as usize,
            ((c.y + r).ceil() as usize).min(bh.saturating_sub(1)),
        )
    }

    /// Minimal bitmap font — 3×5 characters for the status bar and legend.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let bw = self.canvas_w as usize;
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel(cx + col, y + row, color);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > bw {
                break;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backdrop — placeholder video feed
// ────────────────────────────────────────────────────────────────────────────

/// A static stand-in for the camera feed: vertical gradient with a soft
/// vignette, dark enough that ink and models read clearly on top.
fn make_backdrop(w: u32, h: u32) -> Vec<u32> {
    let mut pix = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        let row = blend(BACKDROP_TOP, BACKDROP_BOTTOM, y as f32 / h.max(1) as f32);
        for x in 0..w {
            let edge = (x as f32 / w as f32 - 0.5).abs() * 2.0;
            pix.push(blend(row, BACKDROP_BOTTOM, edge * 0.4));
        }
    }
    pix
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b111, 0b001, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0 - t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF;
    let br = (b >> 16) & 0xFF;
    let ag = (a >> 8) & 0xFF;
    let bg = (b >> 8) & 0xFF;
    let ab = a & 0xFF;
    let bb = b & 0xFF;
    0xFF000000 | (lerp(ar, br) << 16) | (lerp(ag, bg) << 8) | lerp(ab, bb)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
