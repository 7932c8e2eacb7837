//! Left-handed view and projection matrices

use glam::{DMat4, DVec3, DVec4};

/// Look-at camera with a left-handed, GL-style depth range projection
/// (near maps to -1, far to +1).
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    /// Vertical field of view in radians.
    pub fov: f64,
    /// width / height.
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    pub fn new(aspect: f64, fov: f64, near: f64, far: f64) -> Self {
        Self {
            eye: DVec3::ZERO,
            target: DVec3::new(0.0, 0.0, 1.0),
            up: DVec3::Y,
            fov,
            aspect,
            near,
            far,
        }
    }

    pub fn view(&self) -> DMat4 {
        DMat4::look_at_lh(self.eye, self.target, self.up)
    }

    pub fn projection(&self) -> DMat4 {
        let p00 = 1.0 / (self.fov / 2.0).tan();
        let p11 = p00 * self.aspect;
        let near_sub_far = self.near - self.far;
        let p22 = (-self.near - self.far) / near_sub_far;
        let p23 = 2.0 * self.near * self.far / near_sub_far;
        DMat4::from_cols(
            DVec4::new(p00, 0.0, 0.0, 0.0),
            DVec4::new(0.0, p11, 0.0, 0.0),
            DVec4::new(0.0, 0.0, p22, 1.0),
            DVec4::new(0.0, 0.0, p23, 0.0),
        )
    }

    pub fn view_projection(&self) -> DMat4 {
        self.projection() * self.view()
    }
}
