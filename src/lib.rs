//! Ochre: a perspective-correct CPU software rasterizer
//!
//! The `raster` module is the core: barycentric triangle rasterization,
//! perspective-correct attribute interpolation, a depth-buffered
//! framebuffer, and a vertex/fragment shader abstraction behind a generic
//! draw-call pipeline. `scene` and `output` are the thin collaborators the
//! core draws from and into: camera matrices, mesh assets, PPM files.

pub mod logging;
pub mod output;
pub mod raster;
pub mod scene;

pub use raster::{
    BaseVertex, ColorShader, CullMode, DepthFunc, FrameBuffer, ImageShader, ImageVertex,
    PipelineError, PolygonMode, RasterizationData, RenderPipeline, Renderer, Shader,
    Texture2D, TextureError, TextureShader, TexturedVertex,
};
pub use scene::{image_quad, Camera, Mesh, MeshError, TexturedMesh};
