//! Synthetic hands for simulation mode and tests.
//!
//! The simulation input source stands in for the hardware detector, so it
//! must emit the same contract: a full 21-point [`LandmarkSet`]. These
//! constructors build a geometrically plausible hand for a requested pose
//! around a fingertip position; the result goes through the real
//! [`classify`](crate::classify) like any detector frame would.

use glam::Vec2;

use crate::landmark::{
    Landmark, LandmarkSet, INDEX_KNUCKLE, INDEX_TIP, MIDDLE_KNUCKLE, MIDDLE_TIP, PINKY_TIP,
    RING_KNUCKLE, RING_TIP, THUMB_TIP, WRIST,
};

/// Hand poses the simulator can strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandPose {
    /// Fingers spread, thumb away from index — classifies as `Hover`.
    Open,
    /// Middle and ring curled — classifies as `Point`.
    Pointing,
    /// Thumb tip touching index tip — classifies as `Pinch`.
    Pinched,
}

/// Build a landmark set striking `pose` with the index fingertip at
/// `fingertip` (normalized frame coordinates, clamped into `[0,1]`).
pub fn hand_at(pose: HandPose, fingertip: Vec2) -> LandmarkSet {
    let tip = Vec2::new(fingertip.x.clamp(0.0, 1.0), fingertip.y.clamp(0.0, 1.0));

    // Offsets point away from the nearer frame edge so clamping cannot
    // collapse the thumb onto the index tip of a non-pinch pose.
    let dx = if tip.x > 0.5 { -1.0 } else { 1.0 };
    let dy = if tip.y > 0.5 { -1.0 } else { 1.0 };

    let knuckle_y = tip.y + dy * 0.12;
    let extended_y = knuckle_y - dy.abs() * 0.10;
    let curled_y = knuckle_y + dy.abs() * 0.04;

    let thumb = match pose {
        HandPose::Pinched => tip + Vec2::new(0.01, 0.0),
        _ => tip + Vec2::new(dx * 0.25, dy * 0.15),
    };
    let (middle_y, ring_y) = match pose {
        HandPose::Pointing => (curled_y, curled_y),
        _ => (extended_y, extended_y),
    };

    let mut set = LandmarkSet::from_fn(|_| at(tip + Vec2::new(dx * 0.05, dy * 0.08)));
    *set.point_mut(WRIST) = at(tip + Vec2::new(dx * 0.08, dy * 0.25));
    *set.point_mut(THUMB_TIP) = at(thumb);
    *set.point_mut(INDEX_KNUCKLE) = at(Vec2::new(tip.x, knuckle_y));
    *set.point_mut(INDEX_TIP) = at(tip);
    *set.point_mut(MIDDLE_KNUCKLE) = at(Vec2::new(tip.x + dx * 0.04, knuckle_y));
    *set.point_mut(MIDDLE_TIP) = at(Vec2::new(tip.x + dx * 0.04, middle_y));
    *set.point_mut(RING_KNUCKLE) = at(Vec2::new(tip.x + dx * 0.08, knuckle_y));
    *set.point_mut(RING_TIP) = at(Vec2::new(tip.x + dx * 0.08, ring_y));
    *set.point_mut(PINKY_TIP) = at(Vec2::new(tip.x + dx * 0.12, middle_y));
    set
}

fn at(p: Vec2) -> Landmark {
    Landmark::new(p.x.clamp(0.0, 1.0), p.y.clamp(0.0, 1.0), -0.02)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
