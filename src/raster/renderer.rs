//! Draw-call orchestration
//!
//! `pipeline` runs the full shaded path: vertex stage, perspective divide,
//! culling, bounding box, barycentric sampling, perspective-correct
//! interpolation, fragment stage, depth-gated write. The `add_*` primitives
//! share the same math core without the shader indirection.

use glam::{DVec2, DVec3, DVec4};

use super::depth::DepthFunc;
use super::framebuffer::FrameBuffer;
use super::math::{
    barycentric, corrected_weights, divide_by_w, interpolate, is_valid_triangle, Rect,
};
use super::pipeline::{CullMode, RenderPipeline};
use super::shader::{RasterizationData, Shader};

/// Stroke the triangle's edges or scan-convert its interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Line,
    Fill,
}

/// Sample positions covering [start, end] at a pitch of 1/steps, computed
/// from integer-scaled bounds so long spans don't accumulate float error.
fn sample_range(start: f64, end: f64, steps: usize) -> impl Iterator<Item = f64> {
    let scale = steps as f64;
    let s = (start * scale).floor() as i64;
    let e = (end * scale).floor() as i64;
    (s..=e).map(move |i| i as f64 / scale)
}

/// z of the NDC edge cross product; positive for screen-space
/// counter-clockwise triangles.
fn facing(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    (b - a).cross(c - a).z
}

fn passes_cull(a: DVec3, b: DVec3, c: DVec3, mode: CullMode) -> bool {
    match mode {
        CullMode::None => true,
        CullMode::Front => facing(a, b, c) < 0.0,
        CullMode::Back => facing(a, b, c) >= 0.0,
    }
}

/// Owns the framebuffer and draws into it. One renderer, one buffer, one
/// thread; every call runs to completion before returning.
pub struct Renderer {
    frame_buffer: FrameBuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            frame_buffer: FrameBuffer::new(width, height),
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn width(&self) -> usize {
        self.frame_buffer.width()
    }

    pub fn height(&self) -> usize {
        self.frame_buffer.height()
    }

    pub fn flush(&mut self) {
        self.frame_buffer.flush();
    }

    pub fn clear(&mut self, color: DVec4) {
        self.frame_buffer.clear(color);
    }

    /// Depth-gated single-pixel write. Points outside NDC bounds are
    /// silently dropped, unlike the framebuffer's asserting accessors.
    pub fn set_color(&mut self, point: DVec3, color: DVec4, depth_func: DepthFunc) {
        let in_range = |v: f64| v >= -1.0 && v <= 1.0;
        if in_range(point.x) && in_range(point.y) {
            self.frame_buffer.set_pixel_depth(point, color, depth_func);
        }
    }

    /// 2D line at z=0, stepped along the dominant axis so steep slopes
    /// don't leave gaps.
    pub fn add_line_2d(&mut self, p0: DVec2, p1: DVec2, color: DVec4) {
        if p0.x == p1.x {
            for y in sample_range(p0.y.min(p1.y), p0.y.max(p1.y), self.height()) {
                self.set_color(DVec3::new(p0.x, y, 0.0), color, DepthFunc::Always);
            }
        } else if p0.y == p1.y {
            for x in sample_range(p0.x.min(p1.x), p0.x.max(p1.x), self.width()) {
                self.set_color(DVec3::new(x, p0.y, 0.0), color, DepthFunc::Always);
            }
        } else {
            let k = (p1.y - p0.y) / (p1.x - p0.x);
            let b = p0.y - k * p0.x;
            if k.abs() > 1.0 {
                for y in sample_range(p0.y.min(p1.y), p0.y.max(p1.y), self.height()) {
                    self.set_color(DVec3::new((y - b) / k, y, 0.0), color, DepthFunc::Always);
                }
            } else {
                for x in sample_range(p0.x.min(p1.x), p0.x.max(p1.x), self.width()) {
                    self.set_color(DVec3::new(x, k * x + b, 0.0), color, DepthFunc::Always);
                }
            }
        }
    }

    /// Solid-color 2D triangle: stroke the edges or scan-convert the fill.
    pub fn add_triangle_2d(&mut self, a: DVec2, b: DVec2, c: DVec2, color: DVec4, mode: PolygonMode) {
        if !is_valid_triangle(a, b, c) {
            return;
        }
        match mode {
            PolygonMode::Line => {
                self.add_line_2d(a, b, color);
                self.add_line_2d(b, c, color);
                self.add_line_2d(c, a, color);
            }
            PolygonMode::Fill => {
                let mut points = [a, b, c];
                points.sort_by(|lhs, rhs| lhs.y.total_cmp(&rhs.y));
                self.scanline(points[0], points[1], points[0], points[2], points[0].y, points[1].y, color);
                self.scanline(points[1], points[2], points[0], points[2], points[1].y, points[2].y, color);
            }
        }
    }

    /// Fill the rows [y0, y1) between the two active edges.
    fn scanline(
        &mut self,
        e1_start: DVec2,
        e1_end: DVec2,
        e2_start: DVec2,
        e2_end: DVec2,
        y0: f64,
        y1: f64,
        color: DVec4,
    ) {
        // x of an edge at scan row y; vertical edges are constant in x
        let edge_x = |y: f64, p0: DVec2, p1: DVec2| {
            if p0.x == p1.x {
                p0.x
            } else {
                let k = (p1.y - p0.y) / (p1.x - p0.x);
                let b = p0.y - k * p0.x;
                (y - b) / k
            }
        };

        for y in sample_range(y0, y1, self.height()) {
            let x0 = edge_x(y, e1_start, e1_end);
            let x1 = edge_x(y, e2_start, e2_end);
            for x in sample_range(x0.min(x1), x0.max(x1), self.width()) {
                self.set_color(DVec3::new(x, y, 0.0), color, DepthFunc::Always);
            }
        }
    }

    /// Gouraud-shaded 2D triangle: per-vertex colors, barycentric
    /// interpolation, z=0, always-pass depth.
    pub fn add_triangle_2d_colors(
        &mut self,
        p0: DVec2,
        p1: DVec2,
        p2: DVec2,
        c0: DVec4,
        c1: DVec4,
        c2: DVec4,
    ) {
        if !is_valid_triangle(p0, p1, p2) {
            return;
        }
        let rect = Rect::bounding_box(p0, p1, p2);
        for y in sample_range(rect.y, rect.y + rect.height, self.height()) {
            for x in sample_range(rect.x, rect.x + rect.width, self.width()) {
                let test = barycentric(p0, p1, p2, x, y);
                if test.inside() {
                    let point = interpolate(test.vec(), p0, p1, p2);
                    let color = interpolate(test.vec(), c0, c1, c2);
                    self.set_color(point.extend(0.0), color, DepthFunc::Always);
                }
            }
        }
    }

    /// NDC-space triangle with per-vertex colors and a caller-supplied
    /// depth comparator; z interpolated without perspective correction.
    pub fn add_triangle_3d(
        &mut self,
        p0: DVec3,
        p1: DVec3,
        p2: DVec3,
        c0: DVec4,
        c1: DVec4,
        c2: DVec4,
        depth_func: DepthFunc,
    ) {
        let (a, b, c) = (p0.truncate(), p1.truncate(), p2.truncate());
        if !is_valid_triangle(a, b, c) {
            return;
        }
        let rect = Rect::bounding_box(a, b, c);
        for y in sample_range(rect.y, rect.y + rect.height, self.height()) {
            for x in sample_range(rect.x, rect.x + rect.width, self.width()) {
                let test = barycentric(a, b, c, x, y);
                if test.inside() {
                    let point = interpolate(test.vec(), p0, p1, p2);
                    let color = interpolate(test.vec(), c0, c1, c2);
                    self.set_color(point, color, depth_func);
                }
            }
        }
    }

    /// Clip-space triangle with per-vertex colors: homogeneous divide, then
    /// the perspective-corrected color and depth path.
    pub fn add_triangle_clip(
        &mut self,
        p0: DVec4,
        p1: DVec4,
        p2: DVec4,
        c0: DVec4,
        c1: DVec4,
        c2: DVec4,
        depth_func: DepthFunc,
    ) {
        let a = divide_by_w(p0);
        let b = divide_by_w(p1);
        let c = divide_by_w(p2);
        let (pa, pb, pc) = (
            a.position.truncate(),
            b.position.truncate(),
            c.position.truncate(),
        );
        if !is_valid_triangle(pa, pb, pc) {
            return;
        }
        let rect = Rect::bounding_box(pa, pb, pc);
        for y in sample_range(rect.y, rect.y + rect.height, self.height()) {
            for x in sample_range(rect.x, rect.x + rect.width, self.width()) {
                let test = barycentric(pa, pb, pc, x, y);
                if test.inside() {
                    let screen = interpolate(test.vec(), a.position, b.position, c.position);
                    let world = corrected_weights(&test, a.clip_z, b.clip_z, c.clip_z);
                    let depth = interpolate(world, a.position.z, b.position.z, c.position.z);
                    let color = interpolate(world, c0, c1, c2);
                    self.set_color(DVec3::new(screen.x, screen.y, depth), color, depth_func);
                }
            }
        }
    }

    /// Full shaded batch draw. See the module docs for the per-triangle
    /// steps; this is the single entry point for shader-driven rendering.
    pub fn pipeline<S: Shader>(&mut self, pipeline: &RenderPipeline<'_, S>) {
        for i in 0..pipeline.triangle_count() {
            self.shade_triangle(pipeline, i);
        }
    }

    fn shade_triangle<S: Shader>(&mut self, pipeline: &RenderPipeline<'_, S>, index: usize) {
        let shader = pipeline.shader();
        let vertices = pipeline.vertices();
        let a_data = shader.vertex(vertices, index * 3);
        let b_data = shader.vertex(vertices, index * 3 + 1);
        let c_data = shader.vertex(vertices, index * 3 + 2);

        let a = divide_by_w(a_data.position);
        let b = divide_by_w(b_data.position);
        let c = divide_by_w(c_data.position);

        if !passes_cull(a.position, b.position, c.position, pipeline.cull_mode) {
            return;
        }
        let (a2, b2, c2) = (
            a.position.truncate(),
            b.position.truncate(),
            c.position.truncate(),
        );
        if !is_valid_triangle(a2, b2, c2) {
            return;
        }

        let slots = a_data.attributes.len();
        debug_assert_eq!(slots, b_data.attributes.len());
        debug_assert_eq!(slots, c_data.attributes.len());

        let rect = Rect::bounding_box(a2, b2, c2);
        for y in sample_range(rect.y, rect.y + rect.height, self.height()) {
            for x in sample_range(rect.x, rect.x + rect.width, self.width()) {
                let test = barycentric(a2, b2, c2, x, y);
                if !test.inside() {
                    continue;
                }

                // x,y reconstruct the sample point from screen weights;
                // depth and attributes use the corrected weights.
                let screen = interpolate(test.vec(), a.position, b.position, c.position);
                let world = corrected_weights(&test, a.clip_z, b.clip_z, c.clip_z);
                let depth = interpolate(world, a.position.z, b.position.z, c.position.z);

                let mut attributes = Vec::with_capacity(slots);
                for slot in 0..slots {
                    attributes.push(interpolate(
                        world,
                        a_data.attributes[slot],
                        b_data.attributes[slot],
                        c_data.attributes[slot],
                    ));
                }
                let data = RasterizationData {
                    position: DVec4::new(screen.x, screen.y, depth, 1.0),
                    attributes,
                };

                let color = shader.fragment(&data);
                self.set_color(
                    DVec3::new(screen.x, screen.y, depth),
                    color,
                    pipeline.depth_func,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::color;

    fn colored_pixels(renderer: &Renderer) -> usize {
        renderer
            .frame_buffer()
            .data()
            .chunks(3)
            .filter(|px| px.iter().any(|&b| b != 0))
            .count()
    }

    #[test]
    fn set_color_ignores_points_outside_ndc() {
        let mut renderer = Renderer::new(8, 8);
        renderer.set_color(DVec3::new(2.0, 0.0, 0.0), color::WHITE, DepthFunc::Always);
        renderer.set_color(DVec3::new(0.0, -1.5, 0.0), color::WHITE, DepthFunc::Always);
        assert_eq!(colored_pixels(&renderer), 0);

        renderer.set_color(DVec3::new(0.0, 0.0, 0.0), color::WHITE, DepthFunc::Always);
        assert_eq!(colored_pixels(&renderer), 1);
    }

    #[test]
    fn flat_triangle_covers_only_its_pixels() {
        let mut renderer = Renderer::new(32, 32);
        renderer.add_triangle_2d_colors(
            DVec2::new(-0.5, -0.5),
            DVec2::new(0.5, -0.5),
            DVec2::new(-0.5, 0.5),
            color::RED,
            color::RED,
            color::RED,
        );

        let mut covered = 0;
        for px in renderer.frame_buffer().data().chunks(3) {
            if px.iter().any(|&b| b != 0) {
                // weight sums are 1 only to float precision; the byte cast
                // truncates, so a covered pixel reads 254 or 255
                assert!(px[0] >= 254, "covered pixel not red: {:?}", px);
                assert_eq!(&px[1..], &[0, 0]);
                covered += 1;
            }
        }
        assert!(covered > 0);
        // the opposite corner stays background
        let far = renderer.frame_buffer().get_pixel(DVec2::new(0.9, 0.9));
        assert_eq!((far.x, far.y, far.z), (0.0, 0.0, 0.0));
    }

    #[test]
    fn degenerate_triangle_is_silently_skipped() {
        let mut renderer = Renderer::new(16, 16);
        renderer.add_triangle_2d(
            DVec2::new(-0.5, 0.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(0.5, 0.0),
            color::WHITE,
            PolygonMode::Fill,
        );
        assert_eq!(colored_pixels(&renderer), 0);
    }

    #[test]
    fn line_spans_between_endpoints() {
        let mut renderer = Renderer::new(16, 16);
        renderer.add_line_2d(DVec2::new(-0.8, 0.0), DVec2::new(0.8, 0.0), color::WHITE);
        assert!(colored_pixels(&renderer) >= 12);
    }

    #[test]
    fn steep_line_has_no_row_gaps() {
        let mut renderer = Renderer::new(16, 16);
        renderer.add_line_2d(DVec2::new(-0.1, -0.9), DVec2::new(0.1, 0.9), color::WHITE);

        let fb = renderer.frame_buffer();
        let rows_hit = (0..fb.height())
            .filter(|&y| {
                (0..fb.width()).any(|x| {
                    let start = (y * fb.width() + x) * 3;
                    fb.data()[start] != 0
                })
            })
            .count();
        assert!(rows_hit >= 14, "steep line left row gaps: {}", rows_hit);
    }

    #[test]
    fn triangle_3d_respects_depth_order() {
        let mut renderer = Renderer::new(16, 16);
        let near = 0.2;
        let far = 0.8;
        // far triangle first, then near; then far again must not overdraw
        let tri = |z: f64| {
            (
                DVec3::new(-0.9, -0.9, z),
                DVec3::new(0.9, -0.9, z),
                DVec3::new(0.0, 0.9, z),
            )
        };
        let (a, b, c) = tri(far);
        renderer.add_triangle_3d(a, b, c, color::BLUE, color::BLUE, color::BLUE, DepthFunc::Less);
        let (a, b, c) = tri(near);
        renderer.add_triangle_3d(a, b, c, color::RED, color::RED, color::RED, DepthFunc::Less);
        let (a, b, c) = tri(far);
        renderer.add_triangle_3d(
            a,
            b,
            c,
            color::GREEN,
            color::GREEN,
            color::GREEN,
            DepthFunc::Less,
        );

        let center = renderer.frame_buffer().get_pixel(DVec2::new(0.0, 0.0));
        assert!(center.x > 0.99 && center.y == 0.0 && center.z == 0.0);
        let depth = renderer.frame_buffer().depth_at(DVec2::new(0.0, 0.0));
        assert!((depth - near).abs() < 1e-9);
    }

    #[test]
    fn cull_modes_split_front_and_back_faces() {
        // counter-clockwise in screen space: positive facing sign
        let a = DVec3::new(-0.5, -0.5, 0.5);
        let b = DVec3::new(0.5, -0.5, 0.5);
        let c = DVec3::new(0.0, 0.5, 0.5);
        assert!(passes_cull(a, b, c, CullMode::None));
        assert!(passes_cull(a, b, c, CullMode::Back));
        assert!(!passes_cull(a, b, c, CullMode::Front));
        // swap two vertices to flip the winding
        assert!(passes_cull(b, a, c, CullMode::Front));
        assert!(!passes_cull(b, a, c, CullMode::Back));
    }
}
