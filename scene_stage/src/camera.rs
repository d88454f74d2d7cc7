//! Perspective camera with the inverse mapping the drag gesture needs.
//!
//! The camera sits at `(0, 0, 10)` looking at the origin with a 50°
//! vertical field of view, matching the framing the whiteboard was tuned
//! for. Dragging works by casting a ray through the fingertip's NDC
//! position and intersecting it with the `z = 0` plane, where every
//! model lives.

use glam::{Mat4, Vec2, Vec3};

#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Camera {
            position: Vec3::new(0.0, 0.0, 10.0),
            fov_y_deg: 50.0,
            aspect,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// World position → NDC. `None` when the point is at or behind the
    /// camera plane (nothing sensible to rasterize).
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    /// Cast a ray through `ndc` and return where it crosses the `z = 0`
    /// plane — the world-space point a pinched fingertip is "holding".
    pub fn unproject_to_ground(&self, ndc: Vec2) -> Vec3 {
        let inv = self.view_projection().inverse();
        let on_ray = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        let dir = (on_ray - self.position).normalize();
        let t = -self.position.z / dir.z;
        self.position + dir * t
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_hits_origin() {
        let cam = Camera::new(16.0 / 9.0);
        let hit = cam.unproject_to_ground(Vec2::ZERO);
        assert!(hit.length() < 1e-4, "got {:?}", hit);
    }

    #[test]
    fn unprojected_points_lie_on_ground_plane() {
        let cam = Camera::new(16.0 / 9.0);
        for ndc in [
            Vec2::new(0.8, 0.4),
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, 1.0),
        ] {
            let hit = cam.unproject_to_ground(ndc);
            assert!(hit.z.abs() < 1e-4, "ndc {:?} → {:?}", ndc, hit);
        }
    }

    #[test]
    fn project_unproject_roundtrip() {
        let cam = Camera::new(1.0);
        let ndc = Vec2::new(0.3, -0.2);
        let world = cam.unproject_to_ground(ndc);
        let back = cam.project(world).unwrap();
        assert!((back.x - ndc.x).abs() < 1e-4);
        assert!((back.y - ndc.y).abs() < 1e-4);
    }

    #[test]
    fn origin_projects_to_ndc_center() {
        let cam = Camera::new(1.0);
        let ndc = cam.project(Vec3::ZERO).unwrap();
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    }

    #[test]
    fn point_behind_camera_is_rejected() {
        let cam = Camera::new(1.0);
        assert!(cam.project(Vec3::new(0.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn right_of_frame_unprojects_to_positive_x() {
        let cam = Camera::new(16.0 / 9.0);
        let hit = cam.unproject_to_ground(Vec2::new(1.0, 0.0));
        assert!(hit.x > 0.0);
    }
}
