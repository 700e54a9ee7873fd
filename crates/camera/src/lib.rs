//! First-person fly camera.
//!
//! Keyboard translates, mouse orients, scroll zooms. The front vector is
//! always derived from yaw/pitch so the orientation state cannot drift out of
//! sync with the movement basis.
//!
//! # Invariants
//! - Pitch stays within [-89°, 89°] for any sequence of mouse deltas.
//! - Field of view stays within [1°, 45°] for any sequence of scroll inputs.
//! - Camera state is plain data; nothing here touches the GPU.

use glam::{Mat4, Vec3};

/// Pitch limit keeping the view direction away from the vertical axis, where
/// the look-at basis degenerates.
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Narrowest allowed field of view (fully zoomed in).
const FOV_MIN: f32 = 1.0 * std::f32::consts::PI / 180.0;

/// Widest allowed field of view; also the starting value.
const FOV_MAX: f32 = 45.0 * std::f32::consts::PI / 180.0;

/// Fly camera with position, yaw, pitch, and projection parameters.
///
/// Angles and the field of view are stored in radians. Yaw of -90° faces
/// down the negative Z axis, matching the initial view of the scene.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
            fov: FOV_MAX,
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 100.0,
            speed: 2.5,
            sensitivity: 0.1_f32.to_radians(),
        }
    }
}

impl FlyCamera {
    /// Unit view direction derived from yaw and pitch.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Unit strafe direction, perpendicular to the view direction in the
    /// horizontal plane.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn move_forward(&mut self, dt: f32) {
        let fwd = self.forward();
        self.position += fwd * self.speed * dt;
    }

    pub fn move_backward(&mut self, dt: f32) {
        let fwd = self.forward();
        self.position -= fwd * self.speed * dt;
    }

    pub fn move_left(&mut self, dt: f32) {
        let right = self.right();
        self.position -= right * self.speed * dt;
    }

    pub fn move_right(&mut self, dt: f32) {
        let right = self.right();
        self.position += right * self.speed * dt;
    }

    /// Apply a raw mouse delta (pixels, y positive downward).
    ///
    /// Pitch is clamped so the camera can never flip over the vertical axis.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Apply a scroll delta (positive away from the user zooms in).
    pub fn zoom(&mut self, scroll: f32) {
        self.fov = (self.fov - scroll.to_radians()).clamp(FOV_MIN, FOV_MAX);
    }

    /// Update the aspect ratio after a window resize.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "expected {b:?}, got {a:?}");
    }

    #[test]
    fn default_camera_faces_negative_z() {
        let cam = FlyCamera::default();
        assert_close(cam.forward(), Vec3::new(0.0, 0.0, -1.0));
        assert_close(cam.position, Vec3::new(0.0, 0.0, 3.0));

        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn forward_motion_is_deterministic() {
        let mut cam = FlyCamera::default();
        cam.move_forward(1.0);
        // Default speed 2.5 along -Z from z=3.
        assert_close(cam.position, Vec3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn forward_and_strafe_commute() {
        let mut a = FlyCamera::default();
        a.move_forward(0.4);
        a.move_right(0.7);

        let mut b = FlyCamera::default();
        b.move_right(0.7);
        b.move_forward(0.4);

        assert_close(a.position, b.position);
        // And the combined move lands where the basis vectors say it should.
        let cam = FlyCamera::default();
        let expected = cam.position + cam.forward() * 2.5 * 0.4 + cam.right() * 2.5 * 0.7;
        assert_close(a.position, expected);
    }

    #[test]
    fn pitch_is_clamped_for_any_delta_sequence() {
        let mut cam = FlyCamera::default();
        for i in 0..500 {
            // Alternating large swings, biased upward.
            let dy = if i % 3 == 0 { 250.0 } else { -400.0 };
            cam.rotate(17.0, dy);
            assert!(cam.pitch <= 89.0_f32.to_radians() + 1e-6);
            assert!(cam.pitch >= -89.0_f32.to_radians() - 1e-6);
        }
        // Forward must remain well-defined at the clamp boundary.
        assert!(cam.forward().is_finite());
    }

    #[test]
    fn fov_is_clamped_for_any_scroll_sequence() {
        let mut cam = FlyCamera::default();
        for _ in 0..100 {
            cam.zoom(3.0);
            assert!(cam.fov >= 1.0_f32.to_radians() - 1e-6);
        }
        assert!((cam.fov - 1.0_f32.to_radians()).abs() < 1e-5);

        for _ in 0..100 {
            cam.zoom(-3.0);
            assert!(cam.fov <= 45.0_f32.to_radians() + 1e-6);
        }
        assert!((cam.fov - 45.0_f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn zoom_narrows_projection() {
        let mut cam = FlyCamera::default();
        let wide = cam.projection_matrix();
        cam.zoom(20.0);
        let narrow = cam.projection_matrix();
        // Narrower fov scales up the focal terms on the diagonal.
        assert!(narrow.col(0).x > wide.col(0).x);
        assert!(narrow.col(1).y > wide.col(1).y);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut cam = FlyCamera::default();
        cam.set_aspect(1920, 1080);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        // Zero height must not divide by zero.
        cam.set_aspect(800, 0);
        assert!(cam.aspect.is_finite());
    }

    #[test]
    fn look_then_move_follows_view_direction() {
        let mut cam = FlyCamera::default();
        // Look 90° to the right: forward swings from -Z to +X.
        let pixels_for_90_deg = 90.0_f32.to_radians() / cam.sensitivity;
        cam.rotate(pixels_for_90_deg, 0.0);
        assert_close(cam.forward(), Vec3::new(1.0, 0.0, 0.0));

        cam.move_forward(1.0);
        assert_close(cam.position, Vec3::new(2.5, 0.0, 3.0));
    }
}
