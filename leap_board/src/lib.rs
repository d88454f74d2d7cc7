//! # leap_board
//!
//! Hand-gesture whiteboard: one hand drives both a freehand ink layer
//! and a draggable 3D model, composited over a video backdrop in a
//! single window.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Shape | Action |
//! |---|---|---|
//! | Point | index out, middle + ring curled | draw ink at the fingertip |
//! | Pinch | thumb tip on index tip | grab and drag the 3D model |
//! | Hover | open hand | cursor only, releases stroke and drag |
//! | (no hand) | — | everything resets |
//!
//! Each frame the classifier runs over the 21-point landmark set, and
//! the router touches exactly one surface: ink on point, scene on pinch,
//! neither otherwise. The compositor stacks video → ink → 3D → cursor,
//! in that fixed order, every tick.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the mouse stands in for the hand.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via
//!   LeapC and maps its digit joints onto the landmark contract.
//!
//! ### Simulation controls
//!
//! | Input | Meaning |
//! |---|---|
//! | mouse move | hand position |
//! | left button / hold | point (draw) |
//! | right button or `Space` / hold | pinch (drag model) |
//! | `H` / hold | hide the hand |
//! | `1`–`4` | pen color |
//! | `-` / `=` | pen width |
//! | `E` | eraser on/off |
//! | `C` | clear ink |
//! | `M`, `5`–`8` | switch model |
//! | `Q` | quit |

pub mod app;
pub mod compositor;
pub mod hand;
pub mod router;
