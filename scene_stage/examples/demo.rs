//! Renders each model kind to ASCII art with the software rasterizer.

use scene_stage::{Camera, ModelKind, SceneRenderer, SceneStage};

const W: u32 = 72;
const H: u32 = 28;

fn main() {
    println!("\n=== scene_stage demo ===");

    let camera = Camera::new(W as f32 / H as f32);
    let mut renderer = SceneRenderer::new(W, H);

    for kind in ModelKind::ALL {
        let mut stage = SceneStage::with_model(kind);
        // Let the idle spin run for a moment so the pose isn't dead-on.
        for _ in 0..60 {
            stage.tick(false);
        }
        let prims = stage.prims(1.25);
        renderer.render(&prims, &camera);

        println!("\n{} ({} prims)", kind.label(), prims.len());
        for y in 0..H {
            let row: String = (0..W).map(|x| glyph(renderer.pixel(x, y))).collect();
            println!("   {}", row);
        }
    }
}

/// Map a pixel to a rough brightness glyph ('.' = transparent).
fn glyph(p: u32) -> char {
    if p >> 24 == 0 {
        return '.';
    }
    let lum = ((p >> 16 & 0xFF) + (p >> 8 & 0xFF) + (p & 0xFF)) / 3;
    match lum {
        0..=63 => ':',
        64..=127 => '+',
        128..=191 => '#',
        _ => '@',
    }
}
