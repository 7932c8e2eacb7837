//! Preset colors as normalized RGBA vectors

use glam::DVec4;

pub const BLACK: DVec4 = DVec4::new(0.0, 0.0, 0.0, 1.0);
pub const WHITE: DVec4 = DVec4::new(1.0, 1.0, 1.0, 1.0);
pub const RED: DVec4 = DVec4::new(1.0, 0.0, 0.0, 1.0);
pub const GREEN: DVec4 = DVec4::new(0.0, 1.0, 0.0, 1.0);
pub const BLUE: DVec4 = DVec4::new(0.0, 0.0, 1.0, 1.0);
pub const YELLOW: DVec4 = DVec4::new(1.0, 1.0, 0.0, 1.0);

/// Transparent black, the color of a failed texture sample.
pub const TRANSPARENT: DVec4 = DVec4::ZERO;
