//! # scene_stage
//!
//! The 3D layer of the whiteboard: one active model at a time, a pose the
//! router drags around, kind-specific idle animation, and a software
//! rasterizer that turns the scene into a transparent RGBA overlay for
//! the compositor.
//!
//! ## Model kinds
//!
//! | Kind | Geometry | Idle animation |
//! |---|---|---|
//! | `Solar`   | sun + orbiting earth + orbiting moon | orbit at `t`, moon at `2t` |
//! | `Heart`   | lobed heart + aorta tube | pulse scale at `sin(8t)` |
//! | `Eye`     | sclera + iris + pupil discs | — |
//! | `Physics` | mirror slab + incident/reflected rays | static by design |
//!
//! All kinds except `Physics` also spin slowly around the vertical axis
//! while no drag is active.
//!
//! Switching kinds destroys the previous object wholesale — there is
//! never more than one object subtree, and a swap resets position and
//! yaw to the origin.

pub mod camera;
pub mod object;
pub mod render;

pub use camera::Camera;
pub use object::{ModelKind, SceneObject, SceneStage, IDLE_SPIN_RATE};
pub use render::{Prim, SceneRenderer};
