//! Color and depth rasters with NDC addressing
//!
//! Caller-facing coordinates are NDC [-1,1]² with +y up. Storage is
//! row-major from the top-left corner, so the NDC→pixel conversion flips y.

use glam::{DVec2, DVec3, DVec4};

use super::depth::DepthFunc;

/// Software framebuffer owned by one renderer.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,      // RGB, 3 bytes per pixel
    z_buffer: Vec<f64>, // 1.0 = far plane
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "zero-size framebuffer");
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
            z_buffer: vec![1.0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw color raster, row-major, 3 bytes per pixel, top-left origin.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw depth raster, row-major, top-left origin.
    pub fn z_buffer(&self) -> &[f64] {
        &self.z_buffer
    }

    /// Reset color to black and depth to 1.0. Once per frame, before drawing.
    pub fn flush(&mut self) {
        self.data.fill(0);
        self.z_buffer.fill(1.0);
    }

    /// Fill the color raster only; the depth raster is left untouched.
    pub fn clear(&mut self, color: DVec4) {
        for i in 0..self.width * self.height {
            self.write_color(i, color);
        }
    }

    fn ndc_to_pixel(&self, point: DVec2) -> (usize, usize) {
        assert!(
            point.x >= -1.0 && point.x <= 1.0,
            "NDC x out of range: {}",
            point.x
        );
        assert!(
            point.y >= -1.0 && point.y <= 1.0,
            "NDC y out of range: {}",
            point.y
        );
        let x = ((point.x + 1.0) / 2.0 * (self.width - 1) as f64) as usize;
        let y = ((point.y + 1.0) / 2.0 * (self.height - 1) as f64) as usize;
        (x, self.height - 1 - y)
    }

    fn buffer_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn write_color(&mut self, index: usize, color: DVec4) {
        let start = index * 3;
        self.data[start] = (color.x * 255.0) as u8;
        self.data[start + 1] = (color.y * 255.0) as u8;
        self.data[start + 2] = (color.z * 255.0) as u8;
    }

    /// Unconditional color write. Asserts the point is inside NDC bounds.
    pub fn set_pixel(&mut self, point: DVec2, color: DVec4) {
        let (x, y) = self.ndc_to_pixel(point);
        let index = self.buffer_index(x, y);
        self.write_color(index, color);
    }

    /// Color at an NDC point, normalized, alpha fixed at 1.0.
    pub fn get_pixel(&self, point: DVec2) -> DVec4 {
        let (x, y) = self.ndc_to_pixel(point);
        let start = self.buffer_index(x, y) * 3;
        DVec4::new(
            self.data[start] as f64 / 255.0,
            self.data[start + 1] as f64 / 255.0,
            self.data[start + 2] as f64 / 255.0,
            1.0,
        )
    }

    /// Stored depth at an NDC point.
    pub fn depth_at(&self, point: DVec2) -> f64 {
        let (x, y) = self.ndc_to_pixel(point);
        self.z_buffer[self.buffer_index(x, y)]
    }

    /// Depth-tested write: evaluates `func` against the stored depth once
    /// and on success overwrites color and depth together. The only path
    /// that mutates the depth raster.
    pub fn set_pixel_depth(&mut self, point: DVec3, color: DVec4, func: DepthFunc) {
        let (x, y) = self.ndc_to_pixel(point.truncate());
        let index = self.buffer_index(x, y);
        if func.compare(point.z, self.z_buffer[index]) {
            self.z_buffer[index] = point.z;
            self.write_color(index, color);
        }
    }
}
