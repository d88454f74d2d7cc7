//! # hand_model
//!
//! Data model and pure per-frame logic for one detected hand: the
//! 21-point landmark set delivered by an external detector, the named
//! coordinate-space conversions between normalized frame space, pixel
//! space, and NDC, and the gesture classifier that turns one frame's
//! landmarks into one discrete [`Gesture`].
//!
//! ## Landmark contract
//!
//! Per frame the detector yields either nothing (no hand) or exactly one
//! ordered set of 21 points in normalized `[0,1]` image coordinates plus
//! a relative depth. The indices this crate relies on:
//!
//! | Index | Point |
//! |---|---|
//! | 0  | wrist |
//! | 4  | thumb tip |
//! | 5  | index knuckle |
//! | 8  | index tip (the interaction point) |
//! | 9  | middle knuckle |
//! | 12 | middle tip |
//! | 13 | ring knuckle |
//! | 16 | ring tip |
//! | 20 | pinky tip |
//!
//! ## Classification
//!
//! [`classify`] is a pure function of a single frame — no hysteresis, no
//! memory of prior frames. Thumb-to-index pinch wins over every other
//! check; a hand with neither middle nor ring finger extended is pointing;
//! anything else hovers.

pub mod coords;
pub mod gesture;
pub mod landmark;
pub mod synth;

pub use gesture::{classify, Gesture, PINCH_MAX_DIST};
pub use landmark::{Landmark, LandmarkSet, LANDMARK_COUNT};
pub use synth::{hand_at, HandPose};
