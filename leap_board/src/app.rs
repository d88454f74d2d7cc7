//! Top-level application state machine and frame loop.
//!
//! `AppState` owns everything a frame touches — ink surface, scene
//! stage, camera, router, tool state — and hands it down by reference
//! each tick; there are no globals. All mutation happens on the loop
//! thread: hand frames arrive over a channel, window input is polled,
//! and the compositor presents once per tick.

use std::sync::mpsc::{self, TryRecvError};
use std::time::Instant;

use glam::Vec2;

use hand_model::{classify, coords, Gesture};
use ink_surface::InkSurface;
use scene_stage::{Camera, ModelKind, SceneRenderer, SceneStage};

use crate::compositor::Compositor;
use crate::hand::{spawn_hand_source, HandEvent, HandFrame};
use crate::router::{RouteAction, RouteCtx, Router, ToolState};

// ════════════════════════════════════════════════════════════════════════════
// BoardConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Copy, Debug)]
pub struct BoardConfig {
    pub canvas_w: u32,
    pub canvas_h: u32,
    pub start_model: ModelKind,
    pub tools: ToolState,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            canvas_w: 960,
            canvas_h: 540,
            start_model: ModelKind::Solar,
            tools: ToolState::default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// UiCommand — toolbar and model-menu inputs
// ════════════════════════════════════════════════════════════════════════════

/// External UI controls: tool selection, model selection, clear, quit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiCommand {
    /// Pick a pen color; also leaves eraser mode, like the toolbar does.
    SetColor(u32),
    /// Nudge the pen width by a delta, clamped to 1..=64.
    AdjustWidth(i32),
    ToggleEraser,
    /// Wipe the ink surface.
    ClearInk,
    SelectModel(ModelKind),
    /// Step to the next model in toolbar order.
    CycleModel,
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    // ── surfaces ─────────────────────────────────────────────────────────
    ink: InkSurface,
    stage: SceneStage,
    camera: Camera,

    // ── per-frame interaction ────────────────────────────────────────────
    router: Router,
    tools: ToolState,
    gesture: Gesture,
    /// Fingertip in canvas pixels, clamped; `None` when no hand.
    cursor: Option<Vec2>,

    /// Detection throttle: highest source timestamp processed so far.
    /// Frames that do not advance it are redundant and skipped.
    last_ts: Option<u64>,

    // ── status message ───────────────────────────────────────────────────
    pub status: String,

    canvas_w: u32,
    canvas_h: u32,
}

impl AppState {
    pub fn new(cfg: BoardConfig) -> Self {
        let stage = SceneStage::with_model(cfg.start_model);
        AppState {
            ink: InkSurface::new(cfg.canvas_w, cfg.canvas_h),
            stage,
            camera: Camera::new(cfg.canvas_w as f32 / cfg.canvas_h as f32),
            router: Router::new(),
            tools: cfg.tools,
            gesture: Gesture::None,
            cursor: None,
            last_ts: None,
            status: format!("ready - model: {}", cfg.start_model.label()),
            canvas_w: cfg.canvas_w,
            canvas_h: cfg.canvas_h,
        }
    }

    // ── process one UiCommand ────────────────────────────────────────────

    pub fn handle_command(&mut self, cmd: UiCommand) {
        match cmd {
            UiCommand::SetColor(color) => {
                self.tools.eraser = false;
                self.tools.color = color;
                self.status = "pen color changed".to_string();
            }
            UiCommand::AdjustWidth(delta) => {
                self.tools.width = (self.tools.width as i32 + delta).clamp(1, 64) as u32;
                self.status = format!("pen width: {}", self.tools.width);
            }
            UiCommand::ToggleEraser => {
                self.tools.eraser = !self.tools.eraser;
                self.status = if self.tools.eraser {
                    "eraser on".to_string()
                } else {
                    "eraser off".to_string()
                };
            }
            UiCommand::ClearInk => {
                self.ink.clear();
                self.status = "ink cleared".to_string();
            }
            UiCommand::SelectModel(kind) => {
                self.stage.set_active(kind);
                self.status = format!("model: {}", kind.label());
            }
            UiCommand::CycleModel => {
                let next = self
                    .stage
                    .active()
                    .map(|o| o.kind.next())
                    .unwrap_or(ModelKind::Solar);
                self.stage.set_active(next);
                self.status = format!("model: {}", next.label());
            }
            UiCommand::Quit => {
                self.status = "quitting".to_string();
            }
        }
    }

    // ── process one HandFrame ────────────────────────────────────────────

    /// Classify and route one detector frame. Returns `false` when the
    /// frame was skipped by the detection throttle (same video moment as
    /// the last processed frame).
    pub fn handle_frame(&mut self, frame: HandFrame) -> bool {
        if let Some(last) = self.last_ts {
            if frame.timestamp_ms <= last {
                return false;
            }
        }
        self.last_ts = Some(frame.timestamp_ms);

        let gesture = classify(frame.landmarks.as_ref());
        let fingertip = frame
            .landmarks
            .as_ref()
            .map(|l| l.fingertip().xy())
            .unwrap_or(Vec2::ZERO);

        self.gesture = gesture;
        self.cursor = frame.landmarks.as_ref().map(|_| {
            coords::clamp_to_canvas(
                coords::norm_to_pixel(fingertip, self.canvas_w, self.canvas_h),
                self.canvas_w,
                self.canvas_h,
            )
        });

        let mut ctx = RouteCtx {
            ink: &mut self.ink,
            stage: &mut self.stage,
            camera: &self.camera,
            tools: &self.tools,
        };
        let action = self.router.route(gesture, fingertip, &mut ctx);

        self.status = match action {
            RouteAction::Idle => "no hand detected".to_string(),
            RouteAction::Hovering => "hovering".to_string(),
            RouteAction::StrokeStarted => "drawing - stroke started".to_string(),
            RouteAction::SegmentDrawn => {
                let p = self.cursor.unwrap_or(Vec2::ZERO);
                format!("drawing at {},{}", p.x as i32, p.y as i32)
            }
            RouteAction::DragEngaged => "object grabbed".to_string(),
            RouteAction::DragMoved => "moving object".to_string(),
            RouteAction::PinchMissed => "pinch - nothing in reach".to_string(),
        };
        true
    }

    // ── per-frame tick ───────────────────────────────────────────────────

    /// Idle-animation step; runs every render tick regardless of whether
    /// a detection frame arrived.
    pub fn tick(&mut self) {
        self.stage.tick(self.router.drag_active());
    }

    // ── accessors for the render loop ────────────────────────────────────

    pub fn ink(&self) -> &InkSurface {
        &self.ink
    }
    pub fn stage(&self) -> &SceneStage {
        &self.stage
    }
    pub fn camera(&self) -> &Camera {
        &self.camera
    }
    pub fn tools(&self) -> &ToolState {
        &self.tools
    }
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }
    pub fn model(&self) -> Option<ModelKind> {
        self.stage.active().map(|o| o.kind)
    }
    pub fn drag_active(&self) -> bool {
        self.router.drag_active()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the window, spawns the hand source (pointer simulation by
/// default, hardware with `--features leap`), and drives the
/// poll → drain → tick → composite loop at ~60 fps. Detection is
/// throttled per source timestamp inside [`AppState::handle_frame`];
/// compositing runs every tick so the 3D idle animation stays smooth.
pub fn run(cfg: BoardConfig) -> Result<(), String> {
    // ── pointer channel (window → simulated hand) ────────────────────────
    let (pointer_tx, pointer_rx) = mpsc::channel();

    // Hardware mode drops the pointer receiver; the compositor's sends
    // fail silently, which is the intent.
    #[cfg(feature = "leap")]
    let hand_rx = {
        drop(pointer_rx);
        spawn_hand_source(crate::hand::LeapHandSource)
    };
    #[cfg(not(feature = "leap"))]
    let hand_rx = spawn_hand_source(crate::hand::SimHandSource { rx: pointer_rx });

    // ── window + compositor ──────────────────────────────────────────────
    let mut comp = Compositor::new(cfg.canvas_w, cfg.canvas_h, pointer_tx)?;

    // ── app state ────────────────────────────────────────────────────────
    let mut app = AppState::new(cfg);
    let mut renderer = SceneRenderer::new(cfg.canvas_w, cfg.canvas_h);
    let started = Instant::now();

    // ── main loop ────────────────────────────────────────────────────────
    while comp.is_open() {
        // 1. window input → UI commands + pointer snapshot for the sim
        for cmd in comp.poll_input() {
            if cmd == UiCommand::Quit {
                return Ok(());
            }
            app.handle_command(cmd);
        }

        // 2. drain hand events
        loop {
            match hand_rx.try_recv() {
                Ok(HandEvent::Frame(frame)) => {
                    app.handle_frame(frame);
                }
                Ok(HandEvent::Fault(msg)) => {
                    return Err(format!("hand detector unavailable: {}", msg));
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }

        // 3. per-frame logic
        app.tick();

        // 4. composite — the scene re-renders every tick, not just on
        //    detection frames
        let t = started.elapsed().as_secs_f32();
        let prims = app.stage().prims(t);
        let scene = renderer.render(&prims, app.camera());
        comp.render(
            app.ink(),
            scene,
            app.gesture(),
            app.cursor(),
            app.tools(),
            app.model(),
            &app.status,
        )?;
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_model::{hand_at, HandPose, LandmarkSet};

    const W: u32 = 640;
    const H: u32 = 480;

    fn make_app() -> AppState {
        AppState::new(BoardConfig {
            canvas_w: W,
            canvas_h: H,
            ..BoardConfig::default()
        })
    }

    fn frame_at(ts: u64, pose: HandPose, px: f32, py: f32) -> HandFrame {
        HandFrame {
            timestamp_ms: ts,
            landmarks: Some(hand_at(pose, Vec2::new(px / W as f32, py / H as f32))),
        }
    }

    fn empty_frame(ts: u64) -> HandFrame {
        HandFrame {
            timestamp_ms: ts,
            landmarks: None,
        }
    }

    #[test]
    fn two_point_frames_produce_one_segment() {
        let mut app = make_app();
        app.handle_frame(frame_at(1, HandPose::Pointing, 100.0, 100.0));
        assert_eq!(app.ink.coverage(), 0);
        app.handle_frame(frame_at(2, HandPose::Pointing, 120.0, 110.0));
        assert_ne!(app.ink.pixel(110, 105), 0);
        assert_eq!(app.gesture(), Gesture::Point);
    }

    #[test]
    fn stale_timestamp_is_skipped() {
        let mut app = make_app();
        assert!(app.handle_frame(frame_at(5, HandPose::Pointing, 100.0, 100.0)));
        // Same video moment again, different position: redundant.
        assert!(!app.handle_frame(frame_at(5, HandPose::Pointing, 300.0, 300.0)));
        assert_eq!(app.ink.coverage(), 0, "skipped frame must not draw");
    }

    #[test]
    fn lost_hand_releases_drag_and_stops_inking() {
        let mut app = make_app();
        // Engage a drag at the frame center (object starts at origin).
        app.handle_frame(frame_at(1, HandPose::Pinched, W as f32 / 2.0, H as f32 / 2.0));
        assert!(app.drag_active());

        let before = app.ink.coverage();
        for (i, ts) in [2u64, 3, 4].iter().enumerate() {
            app.handle_frame(empty_frame(*ts));
            assert_eq!(app.gesture(), Gesture::None);
            if i == 0 {
                assert!(!app.drag_active(), "drag must end on the first miss");
            }
        }
        assert_eq!(app.ink.coverage(), before);
        assert!(app.cursor().is_none());
    }

    #[test]
    fn pinch_drag_moves_the_object() {
        let mut app = make_app();
        app.handle_frame(frame_at(1, HandPose::Pinched, W as f32 / 2.0, H as f32 / 2.0));
        app.handle_frame(frame_at(2, HandPose::Pinched, W as f32 * 0.7, H as f32 / 2.0));
        let pos = app.stage().active().unwrap().position;
        assert!(pos.x > 0.0, "object should have lerped right, got {:?}", pos);
    }

    #[test]
    fn set_color_leaves_eraser_mode() {
        let mut app = make_app();
        app.handle_command(UiCommand::ToggleEraser);
        assert!(app.tools().eraser);
        app.handle_command(UiCommand::SetColor(0xFFEF4444));
        assert!(!app.tools().eraser);
        assert_eq!(app.tools().color, 0xFFEF4444);
    }

    #[test]
    fn width_clamps_at_one() {
        let mut app = make_app();
        for _ in 0..20 {
            app.handle_command(UiCommand::AdjustWidth(-1));
        }
        assert_eq!(app.tools().width, 1);
    }

    #[test]
    fn clear_ink_wipes_strokes() {
        let mut app = make_app();
        app.handle_frame(frame_at(1, HandPose::Pointing, 100.0, 100.0));
        app.handle_frame(frame_at(2, HandPose::Pointing, 200.0, 200.0));
        assert!(app.ink.coverage() > 0);
        app.handle_command(UiCommand::ClearInk);
        assert_eq!(app.ink.coverage(), 0);
    }

    #[test]
    fn cycle_model_steps_through_kinds() {
        let mut app = make_app();
        assert_eq!(app.model(), Some(ModelKind::Solar));
        app.handle_command(UiCommand::CycleModel);
        assert_eq!(app.model(), Some(ModelKind::Heart));
        app.handle_command(UiCommand::SelectModel(ModelKind::Physics));
        assert_eq!(app.model(), Some(ModelKind::Physics));
    }

    #[test]
    fn malformed_landmarks_keep_cursor_in_canvas() {
        let mut app = make_app();
        // A detector gone wrong: every point far outside [0,1].
        let bad = LandmarkSet::from_fn(|_| hand_model::Landmark::new(7.0, -3.0, 0.0));
        app.handle_frame(HandFrame {
            timestamp_ms: 1,
            landmarks: Some(bad),
        });
        let cursor = app.cursor().expect("hand present");
        assert!(cursor.x <= (W - 1) as f32 && cursor.y <= (H - 1) as f32);
        assert!(cursor.x >= 0.0 && cursor.y >= 0.0);
    }

    #[test]
    fn idle_tick_spins_only_without_drag() {
        let mut app = make_app();
        app.tick();
        let yaw = app.stage().active().unwrap().yaw;
        assert!(yaw > 0.0);

        app.handle_frame(frame_at(1, HandPose::Pinched, W as f32 / 2.0, H as f32 / 2.0));
        assert!(app.drag_active());
        let before = app.stage().active().unwrap().yaw;
        app.tick();
        assert_eq!(app.stage().active().unwrap().yaw, before);
    }
}
