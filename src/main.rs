use std::error::Error;

use image::{ImageBuffer, Rgb};
use log::{error, info, warn};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use tinyraster::camera::{model_view, projection, viewport, OrbitCamera, RenderContext};
use tinyraster::color::Color;
use tinyraster::framebuffer::Framebuffer;
use tinyraster::math::{Vec2, Vec3, Vec4};
use tinyraster::model::Model;
use tinyraster::rasterizer::triangle;
use tinyraster::shader::{FlatShader, GouraudShader, Shader, TexturedShader};
use tinyraster::texture::Texture;

const WIDTH: usize = 800;
const HEIGHT: usize = 800;

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Flat,
    Gouraud,
    Textured,
}

/// Runs the vertex stage for every face of the model and hands the
/// resulting triangles to the rasterizer.
fn render_model(model: &Model, shader: &mut dyn Shader, fb: &mut Framebuffer) {
    for i in 0..model.nfaces() {
        let face = model.face(i);
        let mut clip = [Vec4::ZERO; 3];
        let mut uvs = [Vec2::ZERO; 3];
        for j in 0..3 {
            clip[j] = shader.vertex(model.vert(face[j]), model.normal(i, j), j);
            uvs[j] = model.uv(i, j);
        }
        triangle(clip, uvs, shader, fb);
    }
}

/// The framebuffer keeps y pointing up; window rows and image rows run
/// top-down, so presentation flips.
fn flip_rows(fb: &Framebuffer) -> Vec<u32> {
    let (w, h) = (fb.width(), fb.height());
    let mut out = vec![0u32; w * h];
    for y in 0..h {
        let src = &fb.data()[(h - 1 - y) * w..(h - y) * w];
        out[y * w..(y + 1) * w].copy_from_slice(src);
    }
    out
}

fn save_screenshot(fb: &Framebuffer) {
    let (w, h) = (fb.width(), fb.height());
    let img = ImageBuffer::from_fn(w as u32, h as u32, |x, y| {
        let c = fb.pixel(x as usize, h - 1 - y as usize);
        Rgb([c.r, c.g, c.b])
    });
    match img.save("screenshot.png") {
        Ok(()) => info!("saved screenshot.png"),
        Err(e) => error!("screenshot failed: {e}"),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let model = match args.get(1) {
        Some(path) => Model::load(path)?,
        None => {
            warn!("no model path given, rendering the built-in cube");
            Model::cube()
        }
    };
    let texture = match args.get(2) {
        Some(path) => Texture::load(path)?,
        None => Texture::solid(Color::new(200, 160, 120)),
    };

    let mut window = Window::new("tinyraster", WIDTH, HEIGHT, WindowOptions::default())?;
    window.set_target_fps(60);

    let mut fb = Framebuffer::new(WIDTH, HEIGHT);
    let mut camera = OrbitCamera::new(Vec3::ZERO, 3.0);
    let mut mode = Mode::Gouraud;
    let light_dir = Vec3::new(1.0, 1.0, 1.0);
    let up = Vec3::new(0.0, 1.0, 0.0);
    // Leave a margin around the render, as the reference driver did
    let vp = viewport(
        WIDTH as f32 / 8.0,
        HEIGHT as f32 / 8.0,
        WIDTH as f32 * 3.0 / 4.0,
        HEIGHT as f32 * 3.0 / 4.0,
    );

    info!("starting render loop: {} faces", model.nfaces());

    while window.is_open() && !window.is_key_down(Key::Escape) {
        if window.is_key_down(Key::Left) {
            camera.orbit(-0.03, 0.0);
        }
        if window.is_key_down(Key::Right) {
            camera.orbit(0.03, 0.0);
        }
        if window.is_key_down(Key::Up) {
            camera.orbit(0.0, 0.02);
        }
        if window.is_key_down(Key::Down) {
            camera.orbit(0.0, -0.02);
        }
        if window.is_key_down(Key::W) {
            camera.dolly(-0.05);
        }
        if window.is_key_down(Key::S) {
            camera.dolly(0.05);
        }
        if window.is_key_pressed(Key::Key1, KeyRepeat::No) {
            mode = Mode::Flat;
        }
        if window.is_key_pressed(Key::Key2, KeyRepeat::No) {
            mode = Mode::Gouraud;
        }
        if window.is_key_pressed(Key::Key3, KeyRepeat::No) {
            mode = Mode::Textured;
        }

        let eye = camera.eye();
        let focal = (eye - camera.target).norm();
        let ctx = RenderContext::new(
            model_view(eye, camera.target, up),
            projection(-1.0 / focal),
            vp,
        );

        fb.clear(Color::new(16, 16, 24));
        let mut shader: Box<dyn Shader + '_> = match mode {
            Mode::Flat => Box::new(FlatShader::new(&ctx, Color::new(180, 180, 180))),
            Mode::Gouraud => Box::new(GouraudShader::new(&ctx, light_dir, Color::WHITE)),
            Mode::Textured => Box::new(TexturedShader::new(&ctx, light_dir, &texture)),
        };
        render_model(&model, shader.as_mut(), &mut fb);

        if window.is_key_pressed(Key::P, KeyRepeat::No) {
            save_screenshot(&fb);
        }

        window.update_with_buffer(&flip_rows(&fb), WIDTH, HEIGHT)?;
    }

    Ok(())
}
