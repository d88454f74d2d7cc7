//! The model variants and the stage that owns the single active one.

use glam::Vec3;

use crate::render::Prim;

/// Yaw increment per frame while no drag session is active.
pub const IDLE_SPIN_RATE: f32 = 0.005;

// ════════════════════════════════════════════════════════════════════════════
// Colors
// ════════════════════════════════════════════════════════════════════════════

const SUN_COLOR: u32 = 0xFFFFD733;
const EARTH_COLOR: u32 = 0xFF2233FF;
const MOON_COLOR: u32 = 0xFF888888;
const HEART_COLOR: u32 = 0xFFDD2222;
const AORTA_COLOR: u32 = 0xFF3344CC;
const SCLERA_COLOR: u32 = 0xFFF2F2F2;
const IRIS_COLOR: u32 = 0xFF4B3621;
const PUPIL_COLOR: u32 = 0xFF111111;
const MIRROR_COLOR: u32 = 0xFF88CCFF;
const RAY_COLOR: u32 = 0xFFFFEE00;

// ════════════════════════════════════════════════════════════════════════════
// ModelKind
// ════════════════════════════════════════════════════════════════════════════

/// The selectable model variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelKind {
    Solar,
    Heart,
    Eye,
    Physics,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Solar,
        ModelKind::Heart,
        ModelKind::Eye,
        ModelKind::Physics,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::Solar => "solar system",
            ModelKind::Heart => "heart",
            ModelKind::Eye => "eye",
            ModelKind::Physics => "light reflection",
        }
    }

    /// The next kind in toolbar order, wrapping around.
    pub fn next(&self) -> ModelKind {
        match self {
            ModelKind::Solar => ModelKind::Heart,
            ModelKind::Heart => ModelKind::Eye,
            ModelKind::Eye => ModelKind::Physics,
            ModelKind::Physics => ModelKind::Solar,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SceneObject
// ════════════════════════════════════════════════════════════════════════════

/// The single active model: its kind, identity, and pose.
///
/// `generation` identifies this particular object instance — the drag
/// session records it as its target, so a model swap mid-drag leaves the
/// session pointing at an id that no longer exists and the drag moves
/// nothing.
#[derive(Clone, Copy, Debug)]
pub struct SceneObject {
    pub kind: ModelKind,
    pub generation: u32,
    pub position: Vec3,
    pub yaw: f32,
}

// ════════════════════════════════════════════════════════════════════════════
// SceneStage
// ════════════════════════════════════════════════════════════════════════════

/// Owner of the active object. At most one object subtree exists at a
/// time; swapping kinds drops the old one wholesale.
#[derive(Clone, Debug, Default)]
pub struct SceneStage {
    object: Option<SceneObject>,
    next_generation: u32,
}

impl SceneStage {
    pub fn new() -> Self {
        SceneStage::default()
    }

    pub fn with_model(kind: ModelKind) -> Self {
        let mut stage = SceneStage::new();
        stage.set_active(kind);
        stage
    }

    /// Replace the active object with a fresh one of `kind`, pose reset
    /// to the origin. The previous subtree is dropped here; nothing of
    /// it survives the swap.
    pub fn set_active(&mut self, kind: ModelKind) {
        self.next_generation += 1;
        self.object = Some(SceneObject {
            kind,
            generation: self.next_generation,
            position: Vec3::ZERO,
            yaw: 0.0,
        });
    }

    pub fn active(&self) -> Option<&SceneObject> {
        self.object.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut SceneObject> {
        self.object.as_mut()
    }

    /// Per-frame idle step: the slow vertical-axis spin, suppressed while
    /// a drag session holds the object and always for the static
    /// `Physics` model. Orbit and pulse animation are functions of
    /// elapsed time and live in [`SceneStage::prims`].
    pub fn tick(&mut self, dragging: bool) {
        if let Some(obj) = &mut self.object {
            if !dragging && obj.kind != ModelKind::Physics {
                obj.yaw += IDLE_SPIN_RATE;
            }
        }
    }

    /// Render primitives for the active object at elapsed-seconds `t`.
    pub fn prims(&self, t: f32) -> Vec<Prim> {
        match &self.object {
            None => Vec::new(),
            Some(obj) => match obj.kind {
                ModelKind::Solar => solar_prims(obj, t),
                ModelKind::Heart => heart_prims(obj, t),
                ModelKind::Eye => eye_prims(obj),
                ModelKind::Physics => physics_prims(obj),
            },
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Per-kind geometry
// ════════════════════════════════════════════════════════════════════════════

fn rotate_y(v: Vec3, yaw: f32) -> Vec3 {
    let (s, c) = yaw.sin_cos();
    Vec3::new(v.x * c + v.z * s, v.y, -v.x * s + v.z * c)
}

/// Sun at the pose, earth orbiting at angle `t`, moon orbiting the earth
/// at `2t`.
fn solar_prims(obj: &SceneObject, t: f32) -> Vec<Prim> {
    let earth_pos = obj.position + rotate_y(Vec3::new(3.5, 0.0, 0.0), obj.yaw + t);
    let moon_pos = earth_pos + rotate_y(Vec3::new(0.8, 0.0, 0.0), obj.yaw + t * 2.0);
    vec![
        Prim::Sphere {
            center: obj.position,
            radius: 1.5,
            color: SUN_COLOR,
            emissive: true,
        },
        Prim::Sphere {
            center: earth_pos,
            radius: 0.5,
            color: EARTH_COLOR,
            emissive: false,
        },
        Prim::Sphere {
            center: moon_pos,
            radius: 0.15,
            color: MOON_COLOR,
            emissive: false,
        },
    ]
}

/// Two lobes and an apex pulsing at `sin(8t)`, plus the aorta tube.
fn heart_prims(obj: &SceneObject, t: f32) -> Vec<Prim> {
    let pulse = 1.0 + (t * 8.0).sin() * 0.035;
    let lobe_l = obj.position + rotate_y(Vec3::new(-0.55, 0.55, 0.0), obj.yaw) * pulse;
    let lobe_r = obj.position + rotate_y(Vec3::new(0.55, 0.55, 0.0), obj.yaw) * pulse;
    let apex = obj.position + rotate_y(Vec3::new(0.0, -0.45, 0.0), obj.yaw) * pulse;
    let aorta_a = obj.position + rotate_y(Vec3::new(0.4, 0.9, 0.0), obj.yaw);
    let aorta_b = obj.position + rotate_y(Vec3::new(0.55, 2.2, 0.0), obj.yaw);
    vec![
        Prim::Sphere {
            center: lobe_l,
            radius: 0.85 * pulse,
            color: HEART_COLOR,
            emissive: false,
        },
        Prim::Sphere {
            center: lobe_r,
            radius: 0.85 * pulse,
            color: HEART_COLOR,
            emissive: false,
        },
        Prim::Sphere {
            center: apex,
            radius: 0.65 * pulse,
            color: HEART_COLOR,
            emissive: false,
        },
        Prim::Segment {
            a: aorta_a,
            b: aorta_b,
            width: 0.55,
            color: AORTA_COLOR,
        },
    ]
}

/// Sclera sphere with iris and pupil discs on its front face. The discs
/// ride the yaw rotation; once they swing behind the sphere the painter
/// sort hides them, which is exactly what an eyeball does.
fn eye_prims(obj: &SceneObject) -> Vec<Prim> {
    vec![
        Prim::Sphere {
            center: obj.position,
            radius: 1.5,
            color: SCLERA_COLOR,
            emissive: false,
        },
        Prim::Disc {
            center: obj.position + rotate_y(Vec3::new(0.0, 0.0, 1.45), obj.yaw),
            radius: 0.6,
            color: IRIS_COLOR,
        },
        Prim::Disc {
            center: obj.position + rotate_y(Vec3::new(0.0, 0.0, 1.46), obj.yaw),
            radius: 0.25,
            color: PUPIL_COLOR,
        },
    ]
}

/// Mirror slab outline plus the incident and reflected rays. Static: no
/// idle spin ever applies, though a drag still moves the whole group.
fn physics_prims(obj: &SceneObject) -> Vec<Prim> {
    let p = obj.position;
    let corners = [
        p + Vec3::new(-2.0, -1.5, 0.0),
        p + Vec3::new(2.0, -1.5, 0.0),
        p + Vec3::new(2.0, 1.5, 0.0),
        p + Vec3::new(-2.0, 1.5, 0.0),
    ];
    let mut prims: Vec<Prim> = (0..4)
        .map(|i| Prim::Segment {
            a: corners[i],
            b: corners[(i + 1) % 4],
            width: 0.12,
            color: MIRROR_COLOR,
        })
        .collect();
    prims.push(Prim::Segment {
        a: p + Vec3::new(-3.0, 3.0, 2.0),
        b: p,
        width: 0.1,
        color: RAY_COLOR,
    });
    prims.push(Prim::Segment {
        a: p,
        b: p + Vec3::new(3.0, 3.0, 2.0),
        width: 0.1,
        color: RAY_COLOR,
    });
    prims
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn is_emissive(p: &Prim) -> bool {
        matches!(p, Prim::Sphere { emissive: true, .. })
    }

    #[test]
    fn empty_stage_has_no_prims() {
        assert!(SceneStage::new().prims(0.0).is_empty());
    }

    #[test]
    fn swap_destroys_previous_subtree() {
        // Solar (sun, earth, moon) fully removed before the heart exists.
        let mut stage = SceneStage::with_model(ModelKind::Solar);
        assert!(stage.prims(0.0).iter().any(is_emissive)); // the sun
        stage.set_active(ModelKind::Heart);
        let prims = stage.prims(0.0);
        assert_eq!(stage.active().unwrap().kind, ModelKind::Heart);
        assert!(!prims.iter().any(is_emissive), "solar nodes survived swap");
    }

    #[test]
    fn swap_resets_pose() {
        let mut stage = SceneStage::with_model(ModelKind::Solar);
        let obj = stage.active_mut().unwrap();
        obj.position = Vec3::new(4.0, -2.0, 0.0);
        obj.yaw = 1.2;
        stage.set_active(ModelKind::Eye);
        let obj = stage.active().unwrap();
        assert_eq!(obj.position, Vec3::ZERO);
        assert_eq!(obj.yaw, 0.0);
    }

    #[test]
    fn generation_is_monotonic() {
        let mut stage = SceneStage::with_model(ModelKind::Solar);
        let g1 = stage.active().unwrap().generation;
        stage.set_active(ModelKind::Solar);
        let g2 = stage.active().unwrap().generation;
        assert!(g2 > g1);
    }

    #[test]
    fn idle_tick_spins_unless_dragging() {
        let mut stage = SceneStage::with_model(ModelKind::Heart);
        stage.tick(false);
        assert!((stage.active().unwrap().yaw - IDLE_SPIN_RATE).abs() < 1e-6);
        stage.tick(true);
        assert!((stage.active().unwrap().yaw - IDLE_SPIN_RATE).abs() < 1e-6);
    }

    #[test]
    fn physics_model_never_spins() {
        let mut stage = SceneStage::with_model(ModelKind::Physics);
        for _ in 0..100 {
            stage.tick(false);
        }
        assert_eq!(stage.active().unwrap().yaw, 0.0);
    }

    #[test]
    fn solar_orbit_moves_with_time() {
        let stage = SceneStage::with_model(ModelKind::Solar);
        let earth_at = |t: f32| match stage.prims(t)[1] {
            Prim::Sphere { center, .. } => center,
            _ => unreachable!(),
        };
        assert!(earth_at(0.0).distance(earth_at(1.0)) > 0.1);
    }

    #[test]
    fn heart_pulses_with_time() {
        let stage = SceneStage::with_model(ModelKind::Heart);
        let lobe_radius = |t: f32| match stage.prims(t)[0] {
            Prim::Sphere { radius, .. } => radius,
            _ => unreachable!(),
        };
        // sin(8t) peaks at t = pi/16.
        let peak = lobe_radius(std::f32::consts::PI / 16.0);
        assert!(peak > lobe_radius(0.0));
    }

    #[test]
    fn kind_cycle_covers_all_and_wraps() {
        let mut kind = ModelKind::Solar;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(kind);
            kind = kind.next();
        }
        assert_eq!(kind, ModelKind::Solar);
        assert_eq!(seen.len(), 4);
        for k in ModelKind::ALL {
            assert!(seen.contains(&k));
        }
    }
}
