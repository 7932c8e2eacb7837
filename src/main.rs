//! Demo driver for the software rasterizer
//!
//! Renders into the library's framebuffer and blits the raster to the
//! window through macroquad. Number keys switch scenes, S writes PPM
//! snapshots of the current frame (color + depth).

use ::glam::{DMat4, DVec2, DVec3, DVec4};
use macroquad::prelude::*;

use log::{error, info};
use ochre::output::ppm;
use ochre::raster::color;
use ochre::{
    image_quad, Camera, ColorShader, CullMode, DepthFunc, ImageShader, ImageVertex, Mesh,
    PolygonMode, RenderPipeline, Renderer, Texture2D, TextureShader, TexturedMesh,
};

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Raster dimensions; the window is an integer upscale of these.
const WIDTH: usize = 480;
const HEIGHT: usize = 480;
const SCALE: i32 = 2;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Ochre v{}", VERSION),
        window_width: WIDTH as i32 * SCALE,
        window_height: HEIGHT as i32 * SCALE,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scene {
    ColoredCube,
    TexturedCube,
    ImageQuad,
    Primitives,
}

/// Everything the scene functions draw from, built once in `main` and
/// passed explicitly.
struct DemoAssets {
    colored_cube: Mesh,
    textured_cube: TexturedMesh,
    quad: Vec<ImageVertex>,
    texture: Texture2D,
}

impl DemoAssets {
    fn load() -> Self {
        let colored_cube = match Mesh::load("assets/meshes/cube.ron") {
            Ok(mesh) => mesh,
            Err(e) => {
                info!("no cube asset ({}), using the procedural cube", e);
                Mesh::cube([
                    color::RED,
                    color::GREEN,
                    color::BLUE,
                    color::YELLOW,
                    color::WHITE,
                    DVec4::new(1.0, 0.5, 0.0, 1.0),
                ])
            }
        };
        let texture = match Texture2D::from_file("assets/textures/test.png") {
            Ok(texture) => texture,
            Err(e) => {
                info!("no test texture ({}), using a checkerboard", e);
                Texture2D::checkerboard(64, 64, color::WHITE, DVec4::new(0.2, 0.2, 0.6, 1.0))
            }
        };
        Self {
            colored_cube,
            textured_cube: TexturedMesh::cube(),
            quad: image_quad(0.5),
            texture,
        }
    }
}

fn demo_camera(renderer: &Renderer) -> Camera {
    let aspect = renderer.width() as f64 / renderer.height() as f64;
    Camera::new(aspect, std::f64::consts::FRAC_PI_3, 0.1, 100.0)
}

/// Cube model matrix: pushed out in front of the camera, spinning about
/// the (1,1,1) diagonal.
fn spin_model(time: f64) -> DMat4 {
    DMat4::from_translation(DVec3::new(0.0, 0.0, 5.0))
        * DMat4::from_axis_angle(DVec3::new(1.0, 1.0, 1.0).normalize(), time * 0.6)
}

fn draw_colored_cube(renderer: &mut Renderer, assets: &DemoAssets, time: f64) {
    let camera = demo_camera(renderer);
    let shader = ColorShader::new(spin_model(time), camera.view(), camera.projection());
    match RenderPipeline::from_vertices(&shader, &assets.colored_cube.vertices) {
        Ok(mut pipeline) => {
            pipeline.cull_mode = CullMode::Back;
            renderer.pipeline(&pipeline);
        }
        Err(e) => error!("colored cube pipeline rejected: {}", e),
    }
}

fn draw_textured_cube(renderer: &mut Renderer, assets: &DemoAssets, time: f64) {
    let camera = demo_camera(renderer);
    let shader = TextureShader::new(
        spin_model(time),
        camera.view(),
        camera.projection(),
        &assets.texture,
    );
    match RenderPipeline::from_vertices(&shader, &assets.textured_cube.vertices) {
        Ok(mut pipeline) => {
            pipeline.cull_mode = CullMode::Back;
            renderer.pipeline(&pipeline);
        }
        Err(e) => error!("textured cube pipeline rejected: {}", e),
    }
}

fn draw_image_quad(renderer: &mut Renderer, assets: &DemoAssets) {
    let shader = ImageShader::new(&assets.texture);
    match RenderPipeline::from_vertices(&shader, &assets.quad) {
        Ok(mut pipeline) => {
            pipeline.depth_func = DepthFunc::LessEqual;
            renderer.pipeline(&pipeline);
        }
        Err(e) => error!("image quad pipeline rejected: {}", e),
    }
}

/// The unshaded primitives: corner pixels, a line, wireframe and filled
/// triangles, a gouraud triangle, a depth-tested NDC triangle.
fn draw_primitives(renderer: &mut Renderer) {
    for corner in [
        DVec2::new(-1.0, 1.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(-1.0, -1.0),
        DVec2::new(1.0, -1.0),
    ] {
        renderer.set_color(corner.extend(0.0), color::RED, DepthFunc::Always);
    }

    renderer.add_line_2d(DVec2::new(0.0, 0.0), DVec2::new(1.0, 1.0), color::WHITE);

    renderer.add_triangle_2d(
        DVec2::new(-0.9, 0.9),
        DVec2::new(0.0, 0.87),
        DVec2::new(-0.9, -0.9),
        color::RED,
        PolygonMode::Line,
    );
    renderer.add_triangle_2d(
        DVec2::new(-1.0, 0.5),
        DVec2::new(-1.0, 0.6),
        DVec2::new(-0.9, -0.8),
        color::YELLOW,
        PolygonMode::Fill,
    );
    renderer.add_triangle_2d_colors(
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(0.0, 1.0),
        color::GREEN,
        color::RED,
        color::BLUE,
    );
    renderer.add_triangle_3d(
        DVec3::new(0.0, -0.2, 0.5),
        DVec3::new(0.9, -0.9, 0.5),
        DVec3::new(-0.9, -0.9, 0.5),
        color::RED,
        color::GREEN,
        color::BLUE,
        DepthFunc::Less,
    );
}

fn snapshot(renderer: &Renderer) {
    match ppm::write_color(renderer.frame_buffer(), "snapshot.ppm")
        .and_then(|_| ppm::write_depth(renderer.frame_buffer(), "snapshot_depth.ppm"))
    {
        Ok(()) => info!("wrote snapshot.ppm and snapshot_depth.ppm"),
        Err(e) => error!("snapshot failed: {}", e),
    }
}

/// Expand the RGB raster to RGBA and draw it scaled to the window.
fn blit(fb: &ochre::FrameBuffer) {
    let mut rgba = vec![255u8; fb.width() * fb.height() * 4];
    for (i, px) in fb.data().chunks(3).enumerate() {
        rgba[i * 4..i * 4 + 3].copy_from_slice(px);
    }
    let texture =
        macroquad::texture::Texture2D::from_rgba8(fb.width() as u16, fb.height() as u16, &rgba);
    texture.set_filter(FilterMode::Nearest);
    draw_texture_ex(
        &texture,
        0.0,
        0.0,
        WHITE,
        DrawTextureParams {
            dest_size: Some(Vec2::new(screen_width(), screen_height())),
            ..Default::default()
        },
    );
}

#[macroquad::main(window_conf)]
async fn main() {
    ochre::logging::init();
    info!("ochre v{} — 1-4 select scene, S writes a snapshot", VERSION);

    let mut renderer = Renderer::new(WIDTH, HEIGHT);
    let assets = DemoAssets::load();
    let mut scene = Scene::ColoredCube;

    loop {
        if is_key_pressed(KeyCode::Key1) {
            scene = Scene::ColoredCube;
        } else if is_key_pressed(KeyCode::Key2) {
            scene = Scene::TexturedCube;
        } else if is_key_pressed(KeyCode::Key3) {
            scene = Scene::ImageQuad;
        } else if is_key_pressed(KeyCode::Key4) {
            scene = Scene::Primitives;
        }

        renderer.flush();
        let time = get_time();
        match scene {
            Scene::ColoredCube => draw_colored_cube(&mut renderer, &assets, time),
            Scene::TexturedCube => draw_textured_cube(&mut renderer, &assets, time),
            Scene::ImageQuad => draw_image_quad(&mut renderer, &assets),
            Scene::Primitives => draw_primitives(&mut renderer),
        }

        if is_key_pressed(KeyCode::S) {
            snapshot(&renderer);
        }

        blit(renderer.frame_buffer());
        next_frame().await;
    }
}
