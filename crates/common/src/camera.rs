use glam::{Mat4, Vec3};

/// A perspective camera described by where it sits and what it looks at.
///
/// The session owns two of these: the world camera (re-derived from the
/// player every frame) and the static weapon camera. Aspect ratio is a render
/// concern and is supplied at matrix time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
}

impl Camera {
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 1000.0;

    pub fn new(position: Vec3, target: Vec3, fov_y_degrees: f32) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov_y_degrees,
        }
    }

    /// Normalized view direction.
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            aspect,
            Self::NEAR,
            Self::FAR,
        )
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 2.0, 10.0), Vec3::new(0.0, 2.0, 0.0), 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_normalized() {
        let cam = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), 60.0);
        let d = cam.direction();
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert_eq!(d, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn view_projection_is_finite() {
        let cam = Camera::default();
        let vp = cam.view_projection(16.0 / 9.0);
        assert!(!vp.col(0).x.is_nan());
        assert!(vp.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn default_matches_session_spawn_view() {
        let cam = Camera::default();
        assert_eq!(cam.fov_y_degrees, 60.0);
        assert_eq!(cam.up, Vec3::Y);
    }
}
