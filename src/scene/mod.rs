//! Scene-side collaborators: camera and mesh assets

pub mod camera;
pub mod mesh;

pub use camera::Camera;
pub use mesh::{image_quad, Mesh, MeshError, TexturedMesh};
