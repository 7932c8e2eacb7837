//! Mesh containers, RON asset files, and procedural builders
//!
//! Meshes are triangle soups: every 3 consecutive vertices form one
//! triangle, matching the pipeline's vertex-buffer contract. Asset files
//! use RON for human-readable editing.

use std::fs;
use std::path::Path;

use glam::{DVec2, DVec3, DVec4};
use serde::{Deserialize, Serialize};

use crate::raster::shaders::{BaseVertex, ImageVertex, TexturedVertex};

/// Error type for mesh loading and saving
#[derive(Debug)]
pub enum MeshError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for MeshError {
    fn from(e: std::io::Error) -> Self {
        MeshError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for MeshError {
    fn from(e: ron::error::SpannedError) -> Self {
        MeshError::ParseError(e)
    }
}

impl From<ron::Error> for MeshError {
    fn from(e: ron::Error) -> Self {
        MeshError::SerializeError(e)
    }
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::IoError(e) => write!(f, "IO error: {}", e),
            MeshError::ParseError(e) => write!(f, "Parse error: {}", e),
            MeshError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

fn save_ron<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<(), MeshError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());
    let contents = ron::ser::to_string_pretty(value, config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Cube face corner loops, wound so each face is screen counter-clockwise
/// when it faces the camera under the left-handed view convention.
const CUBE_FACES: [[DVec3; 4]; 6] = {
    const L: f64 = 1.0;
    [
        // front (-z)
        [
            DVec3::new(-L, -L, -L),
            DVec3::new(L, -L, -L),
            DVec3::new(L, L, -L),
            DVec3::new(-L, L, -L),
        ],
        // back (+z)
        [
            DVec3::new(L, -L, L),
            DVec3::new(-L, -L, L),
            DVec3::new(-L, L, L),
            DVec3::new(L, L, L),
        ],
        // right (+x)
        [
            DVec3::new(L, -L, -L),
            DVec3::new(L, -L, L),
            DVec3::new(L, L, L),
            DVec3::new(L, L, -L),
        ],
        // left (-x)
        [
            DVec3::new(-L, -L, L),
            DVec3::new(-L, -L, -L),
            DVec3::new(-L, L, -L),
            DVec3::new(-L, L, L),
        ],
        // top (+y)
        [
            DVec3::new(-L, L, -L),
            DVec3::new(L, L, -L),
            DVec3::new(L, L, L),
            DVec3::new(-L, L, L),
        ],
        // bottom (-y)
        [
            DVec3::new(-L, -L, L),
            DVec3::new(L, -L, L),
            DVec3::new(L, -L, -L),
            DVec3::new(-L, -L, -L),
        ],
    ]
};

// corner order is bottom-left, bottom-right, top-right, top-left
const FACE_UVS: [DVec2; 4] = [
    DVec2::new(0.0, 1.0),
    DVec2::new(1.0, 1.0),
    DVec2::new(1.0, 0.0),
    DVec2::new(0.0, 0.0),
];

// two triangles per quad face
const FACE_TRIANGLES: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// Triangle soup of colored vertices for the `ColorShader` pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<BaseVertex>,
}

impl Mesh {
    /// Unit cube (half extent 1) with one flat color per face, 36 vertices.
    pub fn cube(face_colors: [DVec4; 6]) -> Self {
        let mut vertices = Vec::with_capacity(36);
        for (face, color) in CUBE_FACES.iter().zip(face_colors) {
            for &corner in &FACE_TRIANGLES {
                vertices.push(BaseVertex {
                    position: face[corner],
                    color,
                });
            }
        }
        Self { vertices }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    pub fn from_str(s: &str) -> Result<Self, MeshError> {
        Ok(ron::from_str(s)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MeshError> {
        save_ron(self, path)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Triangle soup of textured vertices for the `TextureShader` pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TexturedMesh {
    pub vertices: Vec<TexturedVertex>,
}

impl TexturedMesh {
    /// Unit cube with the full texture mapped onto each face, 36 vertices.
    pub fn cube() -> Self {
        let mut vertices = Vec::with_capacity(36);
        for face in &CUBE_FACES {
            for &corner in &FACE_TRIANGLES {
                vertices.push(TexturedVertex {
                    position: face[corner],
                    uv: FACE_UVS[corner],
                });
            }
        }
        Self { vertices }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    pub fn from_str(s: &str) -> Result<Self, MeshError> {
        Ok(ron::from_str(s)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MeshError> {
        save_ron(self, path)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Two-triangle screen-space quad for the `ImageShader`, centered on the
/// origin with uv (0,0) at the top-left corner.
pub fn image_quad(half_extent: f64) -> Vec<ImageVertex> {
    let l = half_extent;
    let a = ImageVertex {
        position: DVec2::new(-l, l),
        uv: DVec2::new(0.0, 0.0),
    };
    let b = ImageVertex {
        position: DVec2::new(l, l),
        uv: DVec2::new(1.0, 0.0),
    };
    let c = ImageVertex {
        position: DVec2::new(-l, -l),
        uv: DVec2::new(0.0, 1.0),
    };
    let e = ImageVertex {
        position: DVec2::new(l, -l),
        uv: DVec2::new(1.0, 1.0),
    };
    vec![a, b, c, b, e, c]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::color;

    #[test]
    fn cube_is_a_36_vertex_soup() {
        let mesh = Mesh::cube([color::RED; 6]);
        assert_eq!(mesh.vertices.len(), 36);
        assert_eq!(mesh.triangle_count(), 12);

        let textured = TexturedMesh::cube();
        assert_eq!(textured.vertices.len(), 36);
        // uvs stay in the unit square
        for v in &textured.vertices {
            assert!(v.uv.x >= 0.0 && v.uv.x <= 1.0);
            assert!(v.uv.y >= 0.0 && v.uv.y <= 1.0);
        }
    }

    #[test]
    fn quad_corners_carry_image_uvs() {
        let quad = image_quad(0.5);
        assert_eq!(quad.len(), 6);
        assert_eq!(quad[0].position, DVec2::new(-0.5, 0.5));
        assert_eq!(quad[0].uv, DVec2::new(0.0, 0.0));
        assert_eq!(quad[4].position, DVec2::new(0.5, -0.5));
        assert_eq!(quad[4].uv, DVec2::new(1.0, 1.0));
    }

    #[test]
    fn mesh_survives_a_ron_trip() {
        let mesh = Mesh::cube([
            color::RED,
            color::GREEN,
            color::BLUE,
            color::YELLOW,
            color::WHITE,
            color::BLACK,
        ]);
        let config = ron::ser::PrettyConfig::new();
        let text = ron::ser::to_string_pretty(&mesh, config).unwrap();
        let loaded = Mesh::from_str(&text).unwrap();
        assert_eq!(loaded.vertices.len(), mesh.vertices.len());
        assert_eq!(loaded.vertices[0].position, mesh.vertices[0].position);
        assert_eq!(loaded.vertices[0].color, mesh.vertices[0].color);
    }

    #[test]
    fn bad_ron_reports_a_parse_error() {
        let result = Mesh::from_str("(vertices: [nonsense");
        assert!(matches!(result, Err(MeshError::ParseError(_))));
    }
}
