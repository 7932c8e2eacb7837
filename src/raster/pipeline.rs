//! Draw-call configuration
//!
//! A pipeline is a transient value built per draw call; it borrows the
//! shader and the vertex buffer, it never owns them.

use super::depth::DepthFunc;
use super::shader::Shader;

/// Face culling applied in NDC space, by the sign of the z component of
/// the triangle's edge cross product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    None,
    Front,
    Back,
}

/// Error type for pipeline construction
#[derive(Debug)]
pub enum PipelineError {
    VertexBufferTooSmall { required: usize, len: usize },
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::VertexBufferTooSmall { required, len } => write!(
                f,
                "vertex buffer holds {} records, triangle count requires {}",
                len, required
            ),
        }
    }
}

/// Configuration for one shaded batch draw: depth comparator, cull mode,
/// shader and vertex buffer references, triangle count.
///
/// Every 3 consecutive vertex records form one triangle in the winding the
/// caller supplied; there is no index buffer. Buffer length is validated
/// against the triangle count once, here, instead of per vertex access.
pub struct RenderPipeline<'a, S: Shader> {
    shader: &'a S,
    vertices: &'a [S::Vertex],
    triangle_count: usize,
    pub depth_func: DepthFunc,
    pub cull_mode: CullMode,
}

impl<'a, S: Shader> RenderPipeline<'a, S> {
    /// Defaults: `DepthFunc::Less`, `CullMode::None`.
    pub fn new(
        shader: &'a S,
        vertices: &'a [S::Vertex],
        triangle_count: usize,
    ) -> Result<Self, PipelineError> {
        let required = triangle_count * 3;
        if vertices.len() < required {
            return Err(PipelineError::VertexBufferTooSmall {
                required,
                len: vertices.len(),
            });
        }
        Ok(Self {
            shader,
            vertices,
            triangle_count,
            depth_func: DepthFunc::Less,
            cull_mode: CullMode::None,
        })
    }

    /// Pipeline over the whole buffer, one triangle per 3 records.
    /// Trailing records beyond the last full triangle are ignored.
    pub fn from_vertices(shader: &'a S, vertices: &'a [S::Vertex]) -> Result<Self, PipelineError> {
        Self::new(shader, vertices, vertices.len() / 3)
    }

    pub fn shader(&self) -> &S {
        self.shader
    }

    pub fn vertices(&self) -> &[S::Vertex] {
        self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }
}
