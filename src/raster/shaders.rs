//! Built-in shader variants
//!
//! Three variants covering the demo scenes: flat-colored model, textured
//! model, and screen-space image quad. All of them write attribute slot 0
//! and read it back in the fragment stage.

use glam::{DMat4, DVec2, DVec3, DVec4};
use serde::{Deserialize, Serialize};

use super::color;
use super::shader::{RasterizationData, Shader};
use super::texture::Texture2D;

/// Position + color vertex, the `ColorShader` layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BaseVertex {
    pub position: DVec3,
    pub color: DVec4,
}

/// Position + uv vertex, the `TextureShader` layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TexturedVertex {
    pub position: DVec3,
    pub uv: DVec2,
}

/// 2D position + uv vertex, the `ImageShader` layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImageVertex {
    pub position: DVec2,
    pub uv: DVec2,
}

/// Transforms positions by model/view/projection and passes the vertex
/// color through attribute 0.
#[derive(Debug, Clone)]
pub struct ColorShader {
    pub model: DMat4,
    pub view: DMat4,
    pub projection: DMat4,
}

impl ColorShader {
    pub fn new(model: DMat4, view: DMat4, projection: DMat4) -> Self {
        Self {
            model,
            view,
            projection,
        }
    }
}

impl Shader for ColorShader {
    type Vertex = BaseVertex;

    fn vertex(&self, vertices: &[BaseVertex], index: usize) -> RasterizationData {
        let vertex = vertices[index];
        let mvp = self.projection * self.view * self.model;
        RasterizationData {
            position: mvp * vertex.position.extend(1.0),
            attributes: vec![vertex.color],
        }
    }

    fn fragment(&self, data: &RasterizationData) -> DVec4 {
        data.attributes[0]
    }
}

/// Transforms positions by model/view/projection and samples the bound
/// texture by interpolated uv. Attribute 0 carries (u, v, 1, 1).
pub struct TextureShader<'a> {
    pub model: DMat4,
    pub view: DMat4,
    pub projection: DMat4,
    pub texture: Option<&'a Texture2D>,
}

impl<'a> TextureShader<'a> {
    pub fn new(model: DMat4, view: DMat4, projection: DMat4, texture: &'a Texture2D) -> Self {
        Self {
            model,
            view,
            projection,
            texture: Some(texture),
        }
    }
}

impl Shader for TextureShader<'_> {
    type Vertex = TexturedVertex;

    fn vertex(&self, vertices: &[TexturedVertex], index: usize) -> RasterizationData {
        let vertex = vertices[index];
        let mvp = self.projection * self.view * self.model;
        RasterizationData {
            position: mvp * vertex.position.extend(1.0),
            attributes: vec![DVec4::new(vertex.uv.x, vertex.uv.y, 1.0, 1.0)],
        }
    }

    fn fragment(&self, data: &RasterizationData) -> DVec4 {
        let uv = data.attributes[0];
        match self.texture {
            Some(texture) => texture.sample(DVec2::new(uv.x, uv.y)),
            None => color::TRANSPARENT,
        }
    }
}

/// Draws a pre-projected 2D quad: positions are promoted to clip space as
/// (x, y, 1, 1), so the quad lands at the far plane with no perspective.
pub struct ImageShader<'a> {
    pub texture: Option<&'a Texture2D>,
}

impl<'a> ImageShader<'a> {
    pub fn new(texture: &'a Texture2D) -> Self {
        Self {
            texture: Some(texture),
        }
    }
}

impl Shader for ImageShader<'_> {
    type Vertex = ImageVertex;

    fn vertex(&self, vertices: &[ImageVertex], index: usize) -> RasterizationData {
        let vertex = vertices[index];
        RasterizationData {
            position: DVec4::new(vertex.position.x, vertex.position.y, 1.0, 1.0),
            attributes: vec![DVec4::new(vertex.uv.x, vertex.uv.y, 1.0, 1.0)],
        }
    }

    fn fragment(&self, data: &RasterizationData) -> DVec4 {
        let uv = data.attributes[0];
        match self.texture {
            Some(texture) => texture.sample(DVec2::new(uv.x, uv.y)),
            None => color::TRANSPARENT,
        }
    }
}
