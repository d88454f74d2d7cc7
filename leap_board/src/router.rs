//! The interaction router — gesture state in, one surface touched, out.
//!
//! The router owns the only state that survives a frame: the last draw
//! point (so consecutive point frames chain into a stroke) and the drag
//! session (so consecutive pinch frames keep moving the same object).
//! Drawing and dragging are mutually exclusive; a frame touches the ink
//! surface or the scene, never both.

use glam::Vec2;

use hand_model::{coords, Gesture};
use ink_surface::{InkSurface, StrokeStyle};
use scene_stage::{Camera, SceneStage};

// ════════════════════════════════════════════════════════════════════════════
// Tuning constants
// ════════════════════════════════════════════════════════════════════════════

/// World-space distance on the ground plane within which a pinch
/// captures the active object.
pub const CAPTURE_RADIUS: f32 = 3.0;

/// Per-frame exponential smoothing toward the pinch target. Damps
/// detector jitter; the object never snaps.
pub const DRAG_SMOOTHING: f32 = 0.2;

// ════════════════════════════════════════════════════════════════════════════
// ToolState
// ════════════════════════════════════════════════════════════════════════════

/// Pen configuration, set by the toolbar and read on every draw frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToolState {
    pub color: u32,
    pub width: u32,
    pub eraser: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        ToolState {
            color: 0xFF3B82F6,
            width: 5,
            eraser: false,
        }
    }
}

impl ToolState {
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color,
            width: self.width,
            eraser: self.eraser,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Router
// ════════════════════════════════════════════════════════════════════════════

/// What a routed frame did, for the status readout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAction {
    /// No hand in frame; everything reset.
    Idle,
    /// Open hand; everything reset.
    Hovering,
    /// First point frame of a stroke — position remembered, no ink yet.
    StrokeStarted,
    /// A segment was rasterized into the ink surface.
    SegmentDrawn,
    /// A pinch captured the active object this frame.
    DragEngaged,
    /// An engaged pinch moved its object.
    DragMoved,
    /// A pinch with nothing in reach (or a stale target).
    PinchMissed,
}

/// The mutable surfaces and read-only context a frame may touch.
pub struct RouteCtx<'a> {
    pub ink: &'a mut InkSurface,
    pub stage: &'a mut SceneStage,
    pub camera: &'a Camera,
    pub tools: &'a ToolState,
}

#[derive(Debug, Default)]
pub struct Router {
    /// End of the stroke segment drawn last frame, if the previous frame
    /// was a `Point`.
    last_draw: Option<Vec2>,
    /// Generation id of the object a drag session holds.
    drag_target: Option<u32>,
}

impl Router {
    pub fn new() -> Self {
        Router::default()
    }

    pub fn drag_active(&self) -> bool {
        self.drag_target.is_some()
    }

    /// Drop all cross-frame state (gesture left, hand left, stream reset).
    pub fn reset(&mut self) {
        self.last_draw = None;
        self.drag_target = None;
    }

    /// Route one classified frame. `fingertip` is the fingertip in
    /// normalized frame coordinates; it is clamped before any
    /// rasterization, so out-of-range detector output cannot scribble
    /// outside the canvas.
    pub fn route(&mut self, gesture: Gesture, fingertip: Vec2, ctx: &mut RouteCtx) -> RouteAction {
        match gesture {
            Gesture::Point => {
                // Drawing and dragging are mutually exclusive.
                self.drag_target = None;

                let (w, h) = (ctx.ink.width(), ctx.ink.height());
                let px = coords::clamp_to_canvas(coords::norm_to_pixel(fingertip, w, h), w, h);
                let action = match self.last_draw {
                    Some(prev) => {
                        ctx.ink.draw_segment(prev, px, &ctx.tools.stroke_style());
                        RouteAction::SegmentDrawn
                    }
                    None => RouteAction::StrokeStarted,
                };
                self.last_draw = Some(px);
                action
            }

            Gesture::Pinch => {
                // No stroke continuation across a gesture change.
                self.last_draw = None;

                let world = ctx
                    .camera
                    .unproject_to_ground(coords::norm_to_ndc(fingertip));

                // Engage only when no session is active; an existing
                // session never re-tests or switches target.
                let mut engaged_now = false;
                if self.drag_target.is_none() {
                    if let Some(obj) = ctx.stage.active() {
                        if obj.position.distance(world) < CAPTURE_RADIUS {
                            self.drag_target = Some(obj.generation);
                            engaged_now = true;
                        }
                    }
                }

                match (self.drag_target, ctx.stage.active_mut()) {
                    (Some(id), Some(obj)) if obj.generation == id => {
                        obj.position += (world - obj.position) * DRAG_SMOOTHING;
                        if engaged_now {
                            RouteAction::DragEngaged
                        } else {
                            RouteAction::DragMoved
                        }
                    }
                    _ => RouteAction::PinchMissed,
                }
            }

            Gesture::Hover => {
                self.reset();
                RouteAction::Hovering
            }

            Gesture::None => {
                self.reset();
                RouteAction::Idle
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use scene_stage::ModelKind;

    const W: u32 = 640;
    const H: u32 = 480;

    struct Rig {
        ink: InkSurface,
        stage: SceneStage,
        camera: Camera,
        tools: ToolState,
        router: Router,
    }

    impl Rig {
        fn new() -> Self {
            Rig {
                ink: InkSurface::new(W, H),
                stage: SceneStage::with_model(ModelKind::Solar),
                camera: Camera::new(W as f32 / H as f32),
                tools: ToolState::default(),
                router: Router::new(),
            }
        }

        fn route(&mut self, gesture: Gesture, fingertip: Vec2) -> RouteAction {
            let mut ctx = RouteCtx {
                ink: &mut self.ink,
                stage: &mut self.stage,
                camera: &self.camera,
                tools: &self.tools,
            };
            self.router.route(gesture, fingertip, &mut ctx)
        }

        fn object_pos(&self) -> Vec3 {
            self.stage.active().unwrap().position
        }
    }

    fn norm(px: f32, py: f32) -> Vec2 {
        Vec2::new(px / W as f32, py / H as f32)
    }

    #[test]
    fn two_point_frames_draw_one_segment() {
        let mut rig = Rig::new();
        assert_eq!(
            rig.route(Gesture::Point, norm(100.0, 100.0)),
            RouteAction::StrokeStarted
        );
        assert_eq!(rig.ink.coverage(), 0, "first frame must not draw");
        assert_eq!(
            rig.route(Gesture::Point, norm(120.0, 110.0)),
            RouteAction::SegmentDrawn
        );
        // Midpoint of (100,100)-(120,110) is inked.
        assert_ne!(rig.ink.pixel(110, 105), 0);
    }

    #[test]
    fn gesture_change_breaks_the_stroke() {
        let mut rig = Rig::new();
        rig.route(Gesture::Point, norm(100.0, 100.0));
        rig.route(Gesture::Hover, norm(200.0, 200.0));
        // Next point frame starts over instead of chaining.
        assert_eq!(
            rig.route(Gesture::Point, norm(300.0, 300.0)),
            RouteAction::StrokeStarted
        );
    }

    #[test]
    fn pinch_at_center_engages_and_lerps() {
        let mut rig = Rig::new();
        // Object at the origin; the frame center unprojects onto it.
        assert_eq!(
            rig.route(Gesture::Pinch, norm(W as f32 / 2.0, H as f32 / 2.0)),
            RouteAction::DragEngaged
        );
        // Pinch off to the right: moves 20% toward the target, no snap.
        let target = rig
            .camera
            .unproject_to_ground(coords::norm_to_ndc(Vec2::new(0.7, 0.5)));
        rig.route(Gesture::Pinch, Vec2::new(0.7, 0.5));
        let pos = rig.object_pos();
        assert!(pos.x > 0.0);
        assert!(
            (pos.x - target.x * DRAG_SMOOTHING).abs() < 0.05,
            "expected smoothed motion, got {:?} toward {:?}",
            pos,
            target
        );
        assert!(pos.x < target.x, "must not snap to the target");
    }

    #[test]
    fn pinch_out_of_reach_does_not_engage() {
        let mut rig = Rig::new();
        assert_eq!(
            rig.route(Gesture::Pinch, Vec2::new(0.98, 0.02)),
            RouteAction::PinchMissed
        );
        assert!(!rig.router.drag_active());
        assert_eq!(rig.object_pos(), Vec3::ZERO);
    }

    #[test]
    fn drag_target_is_stable_within_a_pinch_streak() {
        let mut rig = Rig::new();
        rig.route(Gesture::Pinch, Vec2::new(0.5, 0.5));
        assert!(rig.router.drag_active());

        // Swap the model mid-streak: the session holds the old
        // generation and must neither re-engage nor move the new object.
        rig.stage.set_active(ModelKind::Heart);
        assert_eq!(
            rig.route(Gesture::Pinch, Vec2::new(0.5, 0.5)),
            RouteAction::PinchMissed
        );
        assert_eq!(rig.object_pos(), Vec3::ZERO);

        // A non-pinch frame releases; only then can the new object be
        // captured.
        rig.route(Gesture::Hover, Vec2::new(0.5, 0.5));
        assert_eq!(
            rig.route(Gesture::Pinch, Vec2::new(0.5, 0.5)),
            RouteAction::DragEngaged
        );
    }

    #[test]
    fn hover_and_none_release_the_drag() {
        for gesture in [Gesture::Hover, Gesture::None] {
            let mut rig = Rig::new();
            rig.route(Gesture::Pinch, Vec2::new(0.5, 0.5));
            assert!(rig.router.drag_active());
            rig.route(gesture, Vec2::new(0.5, 0.5));
            assert!(!rig.router.drag_active());
        }
    }

    #[test]
    fn point_frame_releases_drag_and_pinch_frame_draws_nothing() {
        let mut rig = Rig::new();
        rig.route(Gesture::Pinch, Vec2::new(0.5, 0.5));
        rig.route(Gesture::Point, norm(50.0, 50.0));
        assert!(!rig.router.drag_active(), "drawing excludes dragging");

        rig.route(Gesture::Pinch, Vec2::new(0.5, 0.5));
        assert_eq!(rig.ink.coverage(), 0, "pinch frames never ink");
    }

    #[test]
    fn out_of_range_fingertip_is_clamped_before_inking() {
        let mut rig = Rig::new();
        rig.route(Gesture::Point, Vec2::new(-3.0, 0.5));
        rig.route(Gesture::Point, Vec2::new(5.0, 0.5));
        // Both endpoints clamped into the canvas; the segment spans it.
        assert_ne!(rig.ink.pixel(W / 2, H / 2), 0);
    }

    #[test]
    fn eraser_tool_erases_through_the_router() {
        let mut rig = Rig::new();
        rig.route(Gesture::Point, norm(100.0, 200.0));
        rig.route(Gesture::Point, norm(300.0, 200.0));
        assert_ne!(rig.ink.pixel(200, 200), 0);

        rig.route(Gesture::Hover, Vec2::ZERO);
        rig.tools.eraser = true;
        rig.route(Gesture::Point, norm(200.0, 100.0));
        rig.route(Gesture::Point, norm(200.0, 300.0));
        assert_eq!(rig.ink.pixel(200, 200), 0);
    }
}
