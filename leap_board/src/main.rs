//! leap_board — interactive entry point.

use leap_board::app::{run, BoardConfig};
use leap_board::router::ToolState;
use scene_stage::ModelKind;
use std::io::{self, Write};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Leap Board — Hand-Gesture Whiteboard                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Mouse simulation  (use --features leap for hardware)");
    println!();

    let cfg = if std::env::args().any(|a| a == "--quick") {
        println!("  Quick-start: 960x540, solar system, blue pen\n");
        BoardConfig::default()
    } else {
        configure_interactively()
    };

    println!();
    println!("  Opening whiteboard window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_interactively() -> BoardConfig {
    let (canvas_w, canvas_h) = loop {
        println!("  Canvas size: 1. 960x540   2. 1280x720   3. 640x480");
        match read_line("  Choice (1-3, default 1): ").trim() {
            "2" => break (1280u32, 720u32),
            "3" => break (640, 480),
            _ => break (960, 540),
        }
    };

    let start_model = loop {
        println!("  Starting model: 1.solar  2.heart  3.eye  4.reflection");
        match read_line("  Choice (1-4, default 1): ").trim() {
            "2" => break ModelKind::Heart,
            "3" => break ModelKind::Eye,
            "4" => break ModelKind::Physics,
            _ => break ModelKind::Solar,
        }
    };

    let color = loop {
        println!("  Pen color: 1.blue  2.red  3.green  4.yellow");
        match read_line("  Choice (1-4, default 1): ").trim() {
            "2" => break 0xFFEF4444,
            "3" => break 0xFF22C55E,
            "4" => break 0xFFEAB308,
            _ => break 0xFF3B82F6,
        }
    };

    let width: u32 = {
        let w = read_line("  Pen width 1-64 (default 5): ")
            .trim()
            .parse()
            .unwrap_or(5);
        w.clamp(1, 64)
    };

    BoardConfig {
        canvas_w,
        canvas_h,
        start_model,
        tools: ToolState {
            color,
            width,
            eraser: false,
        },
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
