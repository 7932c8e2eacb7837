//! Software rasterization core
//!
//! Barycentric triangle rasterization with perspective-correct attribute
//! interpolation, a depth-buffered framebuffer, and a vertex/fragment
//! shader abstraction driving the draw-call orchestrator.

pub mod color;
pub mod depth;
pub mod framebuffer;
pub mod math;
pub mod pipeline;
pub mod renderer;
pub mod shader;
pub mod shaders;
pub mod texture;

pub use depth::DepthFunc;
pub use framebuffer::FrameBuffer;
pub use math::{barycentric, BarycentricWeights, ProjectedVertex, Rect};
pub use pipeline::{CullMode, PipelineError, RenderPipeline};
pub use renderer::{PolygonMode, Renderer};
pub use shader::{RasterizationData, Shader};
pub use shaders::{
    BaseVertex, ColorShader, ImageShader, ImageVertex, TextureShader, TexturedVertex,
};
pub use texture::{Texture2D, TextureError};
