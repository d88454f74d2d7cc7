//! Draws a few strokes and prints the surface as ASCII art.

use glam::Vec2;
use ink_surface::{InkSurface, StrokeStyle};

fn main() {
    println!("\n=== ink_surface demo ===\n");

    let mut ink = InkSurface::new(60, 20);
    let pen = StrokeStyle {
        color: 0xFF3B82F6,
        width: 2,
        eraser: false,
    };

    // A zig-zag stroke, segment by segment, the way the router feeds it.
    let path = [
        Vec2::new(4.0, 16.0),
        Vec2::new(16.0, 4.0),
        Vec2::new(28.0, 16.0),
        Vec2::new(40.0, 4.0),
        Vec2::new(54.0, 16.0),
    ];
    for pair in path.windows(2) {
        ink.draw_segment(pair[0], pair[1], &pen);
    }
    println!("after drawing: {} pixels inked", ink.coverage());
    print_surface(&ink);

    // Erase a horizontal band through the middle.
    let rubber = StrokeStyle {
        eraser: true,
        width: 4,
        ..pen
    };
    ink.draw_segment(Vec2::new(0.0, 10.0), Vec2::new(59.0, 10.0), &rubber);
    println!("after erasing: {} pixels inked", ink.coverage());
    print_surface(&ink);

    ink.clear();
    println!("after clear:   {} pixels inked", ink.coverage());
}

fn print_surface(ink: &InkSurface) {
    for y in 0..ink.height() {
        let row: String = (0..ink.width())
            .map(|x| if ink.pixel(x, y) >> 24 != 0 { '#' } else { '.' })
            .collect();
        println!("   {}", row);
    }
    println!();
}
