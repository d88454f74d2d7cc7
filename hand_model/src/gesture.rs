//! Per-frame gesture classification.
//!
//! [`classify`] is a pure function of one frame's landmarks. It carries
//! no memory between frames, so classification can flicker for a single
//! frame when a hand sits exactly on a threshold; the router downstream
//! consumes transitions, and the thresholds below are tuned so a steady
//! hand lands well clear of them.

use crate::landmark::{
    LandmarkSet, INDEX_TIP, MIDDLE_KNUCKLE, MIDDLE_TIP, RING_KNUCKLE, RING_TIP, THUMB_TIP,
};

// ════════════════════════════════════════════════════════════════════════════
// Thresholds
// ════════════════════════════════════════════════════════════════════════════

/// Maximum thumb-tip ↔ index-tip distance, as a fraction of the
/// normalized frame span, that still counts as a pinch.
///
/// 0.05 of the frame is roughly a touching thumb and index finger at
/// typical webcam distances; fingers held apart measure 0.15–0.30.
pub const PINCH_MAX_DIST: f32 = 0.05;

// ════════════════════════════════════════════════════════════════════════════
// Gesture
// ════════════════════════════════════════════════════════════════════════════

/// The discrete interaction mode derived from one frame's landmarks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// No hand in the frame.
    None,
    /// Open hand — cursor only, no surface is touched.
    Hover,
    /// Index finger out, middle and ring curled — drawing.
    Point,
    /// Thumb and index tips together — 3D object drag.
    Pinch,
}

impl Gesture {
    /// Short label for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            Gesture::None => "no hand",
            Gesture::Hover => "hovering",
            Gesture::Point => "drawing",
            Gesture::Pinch => "moving object",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// classify
// ════════════════════════════════════════════════════════════════════════════

/// Classify one frame.
///
/// Priority order is fixed: the pinch check wins over the point check, so
/// a pinched hand with curled fingers is `Pinch`, never `Point`. A finger
/// is "extended" when its tip sits above its knuckle in image
/// coordinates (smaller y is higher).
pub fn classify(hand: Option<&LandmarkSet>) -> Gesture {
    let hand = match hand {
        Some(h) => h,
        None => return Gesture::None,
    };

    let pinch_dist = hand.point(THUMB_TIP).distance_xy(hand.point(INDEX_TIP));
    if pinch_dist < PINCH_MAX_DIST {
        return Gesture::Pinch;
    }

    let middle_extended = hand.point(MIDDLE_TIP).y < hand.point(MIDDLE_KNUCKLE).y;
    let ring_extended = hand.point(RING_TIP).y < hand.point(RING_KNUCKLE).y;
    if !middle_extended && !ring_extended {
        Gesture::Point
    } else {
        Gesture::Hover
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::Landmark;

    /// Open-hand baseline: thumb far from index, middle and ring extended.
    fn base_hand() -> LandmarkSet {
        let mut set = LandmarkSet::from_fn(|_| Landmark::new(0.5, 0.6, 0.0));
        *set.point_mut(INDEX_TIP) = Landmark::new(0.30, 0.30, 0.0);
        *set.point_mut(THUMB_TIP) = Landmark::new(0.90, 0.90, 0.0);
        *set.point_mut(MIDDLE_KNUCKLE) = Landmark::new(0.50, 0.35, 0.0);
        *set.point_mut(MIDDLE_TIP) = Landmark::new(0.50, 0.20, 0.0);
        *set.point_mut(RING_KNUCKLE) = Landmark::new(0.55, 0.30, 0.0);
        *set.point_mut(RING_TIP) = Landmark::new(0.55, 0.18, 0.0);
        set
    }

    #[test]
    fn no_hand_is_none() {
        assert_eq!(classify(None), Gesture::None);
    }

    #[test]
    fn thumb_on_index_is_pinch() {
        // Thumb (0.50,0.50), index (0.51,0.50): distance 0.01 < 0.05.
        let mut hand = base_hand();
        *hand.point_mut(THUMB_TIP) = Landmark::new(0.50, 0.50, 0.0);
        *hand.point_mut(INDEX_TIP) = Landmark::new(0.51, 0.50, 0.0);
        assert_eq!(classify(Some(&hand)), Gesture::Pinch);
    }

    #[test]
    fn pinch_wins_over_curled_fingers() {
        // Curl middle and ring (would be Point), then pinch: still Pinch.
        let mut hand = base_hand();
        *hand.point_mut(MIDDLE_TIP) = Landmark::new(0.50, 0.40, 0.0);
        *hand.point_mut(RING_TIP) = Landmark::new(0.55, 0.38, 0.0);
        *hand.point_mut(THUMB_TIP) = Landmark::new(0.50, 0.50, 0.0);
        *hand.point_mut(INDEX_TIP) = Landmark::new(0.51, 0.50, 0.0);
        assert_eq!(classify(Some(&hand)), Gesture::Pinch);
    }

    #[test]
    fn extended_fingers_hover() {
        // Middle tip 0.20 < knuckle 0.35, ring tip 0.18 < knuckle 0.30,
        // thumb far from index.
        assert_eq!(classify(Some(&base_hand())), Gesture::Hover);
    }

    #[test]
    fn both_fingers_curled_is_point() {
        let mut hand = base_hand();
        *hand.point_mut(MIDDLE_TIP) = Landmark::new(0.50, 0.40, 0.0); // below knuckle 0.35
        *hand.point_mut(RING_TIP) = Landmark::new(0.55, 0.36, 0.0); // below knuckle 0.30
        assert_eq!(classify(Some(&hand)), Gesture::Point);
    }

    #[test]
    fn one_extended_finger_still_hovers() {
        // Only the ring curled: not a point gesture.
        let mut hand = base_hand();
        *hand.point_mut(RING_TIP) = Landmark::new(0.55, 0.36, 0.0);
        assert_eq!(classify(Some(&hand)), Gesture::Hover);
    }

    #[test]
    fn boundary_distance_is_not_pinch() {
        // Exactly at the threshold: strictly-below comparison, so Hover.
        let mut hand = base_hand();
        *hand.point_mut(THUMB_TIP) = Landmark::new(0.50, 0.50, 0.0);
        *hand.point_mut(INDEX_TIP) = Landmark::new(0.50 + PINCH_MAX_DIST, 0.50, 0.0);
        assert_ne!(classify(Some(&hand)), Gesture::Pinch);
    }
}
