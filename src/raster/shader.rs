//! Shader capability: a vertex stage and a fragment stage
//!
//! A shader declares its vertex record type and projects records to clip
//! space; the renderer owns perspective division and interpolation.

use glam::DVec4;

/// Output of the vertex stage, input (post-interpolation) of the fragment
/// stage.
///
/// `attributes` is an ordered list of per-vertex 4-vectors. The ordinal
/// layout is a fixed contract between a shader's two stages: the fragment
/// stage must index by the same slot the vertex stage wrote. A mismatch is
/// a silent logic defect, not a signaled error.
#[derive(Debug, Clone)]
pub struct RasterizationData {
    pub position: DVec4,
    pub attributes: Vec<DVec4>,
}

/// A shader variant: vertex layout, bound uniforms, and the two stages.
pub trait Shader {
    type Vertex;

    /// Read the vertex record at `index` and project it to clip space,
    /// emitting the fixed-order attribute list. Perspective division is
    /// left to the renderer.
    fn vertex(&self, vertices: &[Self::Vertex], index: usize) -> RasterizationData;

    /// Shade one sample from perspective-corrected data. Returns a
    /// normalized RGBA color.
    fn fragment(&self, data: &RasterizationData) -> DVec4;
}
