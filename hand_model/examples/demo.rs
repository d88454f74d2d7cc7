//! Demonstrates the landmark model, coordinate transforms, and classifier.

use glam::Vec2;
use hand_model::{classify, coords, hand_at, Gesture, HandPose, PINCH_MAX_DIST};

fn main() {
    println!("\n=== hand_model demo ===\n");

    // ── 1. Synthetic hands through the real classifier ───────────────────
    println!("1. Synthetic poses");
    for pose in [HandPose::Open, HandPose::Pointing, HandPose::Pinched] {
        let hand = hand_at(pose, Vec2::new(0.5, 0.5));
        let g = classify(Some(&hand));
        println!("   {:?} → {:?} ({})", pose, g, g.label());
    }
    println!("   (none)   → {:?}", classify(None));
    println!();

    // ── 2. Pinch threshold sweep ─────────────────────────────────────────
    println!("2. Pinch threshold (PINCH_MAX_DIST = {})", PINCH_MAX_DIST);
    for sep in [0.01f32, 0.03, 0.05, 0.08, 0.20] {
        let mut hand = hand_at(HandPose::Open, Vec2::new(0.5, 0.5));
        *hand.point_mut(hand_model::landmark::THUMB_TIP) =
            hand_model::Landmark::new(0.5 + sep, 0.5, 0.0);
        let g = classify(Some(&hand));
        let verdict = if g == Gesture::Pinch { "pinch" } else { "not a pinch" };
        println!("   separation {:.2} → {}", sep, verdict);
    }
    println!();

    // ── 3. Coordinate transforms ─────────────────────────────────────────
    println!("3. Coordinate spaces for a 1280x720 canvas");
    let norm = Vec2::new(0.25, 0.75);
    let px = coords::norm_to_pixel(norm, 1280, 720);
    let ndc = coords::norm_to_ndc(norm);
    println!("   normalized {:?}", norm);
    println!("   pixel      {:?}", px);
    println!("   NDC        {:?}  (y flips)", ndc);
    let wild = Vec2::new(-50.0, 4000.0);
    println!(
        "   clamp {:?} → {:?}",
        wild,
        coords::clamp_to_canvas(wild, 1280, 720)
    );
}
