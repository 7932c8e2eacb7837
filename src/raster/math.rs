//! Triangle math for the rasterizer
//!
//! Barycentric point testing, bounding boxes, homogeneous division and
//! the perspective correction applied during attribute interpolation.

use std::ops::{Add, Mul};

use glam::{DVec2, DVec3, DVec4};

/// Result of a barycentric point-in-triangle test.
///
/// Weights are ordered by vertex: querying exactly at `a` yields (1,0,0),
/// at `b` (0,1,0), at `c` (0,0,1).
#[derive(Debug, Clone, Copy)]
pub struct BarycentricWeights {
    pub w1: f64,
    pub w2: f64,
    pub w3: f64,
}

impl BarycentricWeights {
    /// True iff every weight lies in [0,1].
    ///
    /// A collinear triangle makes the cross product's z component zero and
    /// every weight NaN; NaN fails both bound checks, so all points read
    /// as outside without a special case.
    pub fn inside(&self) -> bool {
        let check = |w: f64| w >= 0.0 && w <= 1.0;
        check(self.w1) && check(self.w2) && check(self.w3)
    }

    pub fn vec(&self) -> DVec3 {
        DVec3::new(self.w1, self.w2, self.w3)
    }
}

/// Barycentric weights of the point (x, y) in triangle (a, b, c).
///
/// Uses a single 3D cross product of the two edge/point difference lines
/// instead of a two-step Cramer solve.
pub fn barycentric(a: DVec2, b: DVec2, c: DVec2, x: f64, y: f64) -> BarycentricWeights {
    let u = DVec3::new(c.x - a.x, b.x - a.x, a.x - x)
        .cross(DVec3::new(c.y - a.y, b.y - a.y, a.y - y));
    BarycentricWeights {
        w1: 1.0 - (u.x + u.y) / u.z,
        w2: u.y / u.z,
        w3: u.x / u.z,
    }
}

/// Weighted sum of three values (scalar or vector) under barycentric weights.
pub fn interpolate<T>(weights: DVec3, v1: T, v2: T, v3: T) -> T
where
    T: Mul<f64, Output = T> + Add<Output = T>,
{
    v1 * weights.x + v2 * weights.y + v3 * weights.z
}

/// Screen-space weights corrected to true (pre-projection) weights.
///
/// When all three z values are equal the screen weights are already exact
/// and the 1/z form would divide zero by zero, so they pass through as-is.
pub fn corrected_weights(screen: &BarycentricWeights, z1: f64, z2: f64, z3: f64) -> DVec3 {
    if z1 == z2 && z2 == z3 {
        return screen.vec();
    }
    let z_world = 1.0 / (screen.w1 / z1 + screen.w2 / z2 + screen.w3 / z3);
    DVec3::new(
        z_world * screen.w1 / z1,
        z_world * screen.w2 / z2,
        z_world * screen.w3 / z3,
    )
}

/// A clip-space position after the homogeneous divide.
///
/// `clip_z` keeps the original clip-space z, which the perspective
/// correction needs after `position` has been divided through by w.
#[derive(Debug, Clone, Copy)]
pub struct ProjectedVertex {
    pub position: DVec3,
    pub clip_z: f64,
}

/// Divide a clip-space position by its w component.
pub fn divide_by_w(v: DVec4) -> ProjectedVertex {
    ProjectedVertex {
        position: DVec3::new(v.x / v.w, v.y / v.w, v.z / v.w),
        clip_z: v.z,
    }
}

/// Axis-aligned bounding box of three 2D points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bounding_box(a: DVec2, b: DVec2, c: DVec2) -> Rect {
        let x = a.x.min(b.x).min(c.x);
        let y = a.y.min(b.y).min(c.y);
        Rect {
            x,
            y,
            width: a.x.max(b.x).max(c.x) - x,
            height: a.y.max(b.y).max(c.y) - y,
        }
    }
}

/// Coarse validity guard via the triangle inequality on pairwise distances.
/// Rejects collinear and near-degenerate triangles; not an epsilon-robust
/// area test.
pub fn is_valid_triangle(a: DVec2, b: DVec2, c: DVec2) -> bool {
    let d0 = a.distance(b);
    let d1 = b.distance(c);
    let d2 = c.distance(a);
    d0 + d1 > d2 && (d0 - d1).abs() < d2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_point_weights_sum_to_one() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(1.0, 0.0);
        let c = DVec2::new(0.0, 1.0);
        let w = barycentric(a, b, c, 0.25, 0.25);
        assert!(w.inside());
        assert!((w.w1 + w.w2 + w.w3 - 1.0).abs() < 1e-9);
        assert!(w.w1 >= 0.0 && w.w1 <= 1.0);
        assert!(w.w2 >= 0.0 && w.w2 <= 1.0);
        assert!(w.w3 >= 0.0 && w.w3 <= 1.0);
    }

    #[test]
    fn weights_at_vertices_follow_ordinal_convention() {
        let a = DVec2::new(-0.5, -0.5);
        let b = DVec2::new(0.5, -0.25);
        let c = DVec2::new(0.0, 0.75);

        let at_a = barycentric(a, b, c, a.x, a.y);
        assert!((at_a.w1 - 1.0).abs() < 1e-9);
        assert!(at_a.w2.abs() < 1e-9);
        assert!(at_a.w3.abs() < 1e-9);

        let at_b = barycentric(a, b, c, b.x, b.y);
        assert!(at_b.w1.abs() < 1e-9);
        assert!((at_b.w2 - 1.0).abs() < 1e-9);
        assert!(at_b.w3.abs() < 1e-9);

        let at_c = barycentric(a, b, c, c.x, c.y);
        assert!(at_c.w1.abs() < 1e-9);
        assert!(at_c.w2.abs() < 1e-9);
        assert!((at_c.w3 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn outside_point_fails_test() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(1.0, 0.0);
        let c = DVec2::new(0.0, 1.0);
        let w = barycentric(a, b, c, 2.0, 2.0);
        assert!(!w.inside());
        assert!(w.w1 < 0.0 || w.w1 > 1.0 || w.w2 < 0.0 || w.w2 > 1.0 || w.w3 < 0.0 || w.w3 > 1.0);
    }

    #[test]
    fn collinear_triangle_classifies_everything_outside() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(0.5, 0.0);
        let c = DVec2::new(1.0, 0.0);
        let w = barycentric(a, b, c, 0.5, 0.0);
        assert!(w.w1.is_nan() || w.w2.is_nan() || w.w3.is_nan());
        assert!(!w.inside());

        let off = barycentric(a, b, c, 10.0, -3.0);
        assert!(!off.inside());
    }

    #[test]
    fn bounding_box_of_axis_triangle() {
        let r = Rect::bounding_box(
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(0.0, 3.0),
        );
        assert_eq!(
            r,
            Rect {
                x: 0.0,
                y: 0.0,
                width: 4.0,
                height: 3.0
            }
        );
    }

    #[test]
    fn interpolate_mixes_scalars_and_vectors() {
        let w = DVec3::new(0.5, 0.25, 0.25);
        let s = interpolate(w, 1.0, 2.0, 4.0);
        assert!((s - 2.0).abs() < 1e-9);

        let v = interpolate(
            w,
            DVec4::new(1.0, 0.0, 0.0, 1.0),
            DVec4::new(0.0, 1.0, 0.0, 1.0),
            DVec4::new(0.0, 0.0, 1.0, 1.0),
        );
        assert!((v.x - 0.5).abs() < 1e-9);
        assert!((v.y - 0.25).abs() < 1e-9);
        assert!((v.z - 0.25).abs() < 1e-9);
        assert!((v.w - 1.0).abs() < 1e-9);
    }

    #[test]
    fn equal_depths_keep_screen_weights() {
        let screen = BarycentricWeights {
            w1: 0.2,
            w2: 0.3,
            w3: 0.5,
        };
        let corrected = corrected_weights(&screen, 5.0, 5.0, 5.0);
        assert!((corrected.x - 0.2).abs() < 1e-9);
        assert!((corrected.y - 0.3).abs() < 1e-9);
        assert!((corrected.z - 0.5).abs() < 1e-9);
    }

    #[test]
    fn unequal_depths_reweight_by_inverse_z() {
        let screen = BarycentricWeights {
            w1: 0.5,
            w2: 0.5,
            w3: 0.0,
        };
        let corrected = corrected_weights(&screen, 1.0, 3.0, 2.0);
        assert!((corrected.x - 0.75).abs() < 1e-9);
        assert!((corrected.y - 0.25).abs() < 1e-9);
        assert!(corrected.z.abs() < 1e-9);
        assert!((corrected.x + corrected.y + corrected.z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn divide_by_w_keeps_clip_z() {
        let v = divide_by_w(DVec4::new(2.0, 4.0, 6.0, 2.0));
        assert!((v.position.x - 1.0).abs() < 1e-9);
        assert!((v.position.y - 2.0).abs() < 1e-9);
        assert!((v.position.z - 3.0).abs() < 1e-9);
        assert!((v.clip_z - 6.0).abs() < 1e-9);
    }

    #[test]
    fn validity_guard_rejects_collinear_points() {
        assert!(is_valid_triangle(
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(0.0, 3.0),
        ));
        assert!(!is_valid_triangle(
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 0.0),
        ));
        assert!(!is_valid_triangle(
            DVec2::new(0.3, 0.3),
            DVec2::new(0.3, 0.3),
            DVec2::new(0.3, 0.3),
        ));
    }
}
