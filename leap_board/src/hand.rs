//! Hand-frame acquisition — LeapMotion hardware or pointer simulation.
//!
//! The public interface is [`HandEvent`] delivered over an `mpsc`
//! channel. Consumers don't need to know whether landmark sets came from
//! real hardware or the pointer simulator; both emit the same 21-point
//! contract and both go through the same classifier downstream.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Instant;

use glam::Vec2;
use hand_model::{hand_at, HandPose, LandmarkSet};

// ════════════════════════════════════════════════════════════════════════════
// HandFrame / HandEvent
// ════════════════════════════════════════════════════════════════════════════

/// One detector invocation's output.
#[derive(Clone, Debug)]
pub struct HandFrame {
    /// Source timestamp. Two frames with the same timestamp describe the
    /// same video moment; the app skips reclassifying the second one.
    pub timestamp_ms: u64,
    /// The detected hand, or `None` when no hand is in frame.
    pub landmarks: Option<LandmarkSet>,
}

/// Messages from a hand source thread.
#[derive(Clone, Debug)]
pub enum HandEvent {
    Frame(HandFrame),
    /// The detector cannot run at all — no device, failed connection.
    /// Fatal: the pipeline must not start, and nothing is retried.
    Fault(String),
}

// ════════════════════════════════════════════════════════════════════════════
// HandSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`HandEvent`]s over a channel.
pub trait HandSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<HandEvent>);
}

/// Spawn a hand source on its own thread and return the receiving end.
pub fn spawn_hand_source<S: HandSource>(source: S) -> Receiver<HandEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource — pointer simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Pointer snapshot forwarded from the window, one per polled tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Pointer position normalized to the canvas, `[0,1]` × `[0,1]`.
    pub pos: Vec2,
    /// Left button — strike the pointing (drawing) pose.
    pub draw_held: bool,
    /// Right button or Space — strike the pinched (grabbing) pose.
    pub grab_held: bool,
    /// `H` held — pretend the hand left the frame.
    pub hidden: bool,
}

/// Which pose a pointer snapshot stands for; `None` means no hand.
/// Grab wins over draw, matching the classifier's pinch priority.
pub fn pose_for(p: &PointerState) -> Option<HandPose> {
    if p.hidden {
        None
    } else if p.grab_held {
        Some(HandPose::Pinched)
    } else if p.draw_held {
        Some(HandPose::Pointing)
    } else {
        Some(HandPose::Open)
    }
}

/// Hand source driven by [`PointerState`] snapshots from the window.
///
/// Each snapshot becomes a full synthetic landmark set (or an empty
/// frame), stamped with elapsed milliseconds so the app's per-timestamp
/// detection throttle behaves exactly as it would against hardware.
pub struct SimHandSource {
    pub rx: Receiver<PointerState>,
}

impl HandSource for SimHandSource {
    fn run(self: Box<Self>, tx: Sender<HandEvent>) {
        let started = Instant::now();
        for pointer in self.rx {
            let landmarks = pose_for(&pointer).map(|pose| hand_at(pose, pointer.pos));
            let frame = HandFrame {
                timestamp_ms: started.elapsed().as_millis() as u64,
                landmarks,
            };
            if tx.send(HandEvent::Frame(frame)).is_err() {
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapHandSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hand source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library
/// installed. The first tracked hand's digit joints are mapped onto the
/// 21-landmark contract, with interaction-box millimeters normalized
/// into `[0,1]` frame coordinates (Leap's y axis points up, the frame's
/// points down, so the vertical axis flips).
#[cfg(feature = "leap")]
pub struct LeapHandSource;

#[cfg(feature = "leap")]
impl HandSource for LeapHandSource {
    fn run(self: Box<Self>, tx: Sender<HandEvent>) {
        use leaprs::*;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c) => c,
            Err(e) => {
                let _ = tx.send(HandEvent::Fault(format!("LeapC connection failed: {e:?}")));
                return;
            }
        };
        if let Err(e) = connection.open() {
            let _ = tx.send(HandEvent::Fault(format!("LeapMotion device failed to open: {e:?}")));
            return;
        }

        let started = Instant::now();
        loop {
            let msg = match connection.poll(100) {
                Ok(m) => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands: Vec<_> = frame.hands().collect();
                let landmarks = hands.first().map(map_hand);
                let out = HandFrame {
                    timestamp_ms: started.elapsed().as_millis() as u64,
                    landmarks,
                };
                if tx.send(HandEvent::Frame(out)).is_err() {
                    return;
                }
            }
        }
    }
}

/// Map one Leap hand onto the 21-landmark layout: wrist at 0, then four
/// joints per digit (knuckle → tip) at `1 + digit*4 ..`.
#[cfg(feature = "leap")]
fn map_hand(hand: &leaprs::Hand) -> LandmarkSet {
    use hand_model::landmark::WRIST;

    let palm = hand.palm().position();
    let palm_lm = leap_landmark(palm.x, palm.y, palm.z);

    let mut set = LandmarkSet::from_fn(|_| palm_lm);
    *set.point_mut(WRIST) = palm_lm;

    let fingers: Vec<_> = hand.digits().collect();
    for (f, digit) in fingers.iter().enumerate().take(5) {
        let joints = [
            digit.proximal().prev_joint(),
            digit.intermediate().prev_joint(),
            digit.distal().prev_joint(),
            digit.distal().next_joint(),
        ];
        for (j, joint) in joints.iter().enumerate() {
            *set.point_mut(1 + f * 4 + j) = leap_landmark(joint.x, joint.y, joint.z);
        }
    }
    set
}

/// Interaction-box millimeters → normalized frame coordinates.
/// x spans ±200 mm, y spans 80–400 mm above the device.
#[cfg(feature = "leap")]
fn leap_landmark(x: f32, y: f32, z: f32) -> hand_model::Landmark {
    hand_model::Landmark::new(
        ((x + 200.0) / 400.0).clamp(0.0, 1.0),
        (1.0 - (y - 80.0) / 320.0).clamp(0.0, 1.0),
        z / 400.0,
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_model::{classify, Gesture};

    #[test]
    fn pose_priority_grab_over_draw() {
        let p = PointerState {
            draw_held: true,
            grab_held: true,
            ..PointerState::default()
        };
        assert_eq!(pose_for(&p), Some(HandPose::Pinched));
    }

    #[test]
    fn hidden_wins_over_everything() {
        let p = PointerState {
            draw_held: true,
            grab_held: true,
            hidden: true,
            ..PointerState::default()
        };
        assert_eq!(pose_for(&p), None);
    }

    #[test]
    fn idle_pointer_is_open_hand() {
        assert_eq!(pose_for(&PointerState::default()), Some(HandPose::Open));
    }

    #[test]
    fn sim_source_emits_classifiable_frames() {
        let (ptr_tx, ptr_rx) = mpsc::channel();
        let rx = spawn_hand_source(SimHandSource { rx: ptr_rx });

        ptr_tx
            .send(PointerState {
                pos: Vec2::new(0.5, 0.5),
                draw_held: true,
                ..PointerState::default()
            })
            .unwrap();
        drop(ptr_tx);

        match rx.recv().unwrap() {
            HandEvent::Frame(f) => {
                assert_eq!(classify(f.landmarks.as_ref()), Gesture::Point);
            }
            HandEvent::Fault(m) => panic!("unexpected fault: {}", m),
        }
    }

    #[test]
    fn sim_source_reports_missing_hand() {
        let (ptr_tx, ptr_rx) = mpsc::channel();
        let rx = spawn_hand_source(SimHandSource { rx: ptr_rx });

        ptr_tx
            .send(PointerState {
                hidden: true,
                ..PointerState::default()
            })
            .unwrap();
        drop(ptr_tx);

        match rx.recv().unwrap() {
            HandEvent::Frame(f) => assert!(f.landmarks.is_none()),
            HandEvent::Fault(m) => panic!("unexpected fault: {}", m),
        }
    }
}
