//! The two-stage programmable shading contract and the stock shading
//! strategies.
//!
//! The rasterizer drives any `Shader` through the same protocol: `vertex`
//! runs exactly three times per triangle, once per corner, before any
//! fragment work; `fragment` runs at most once per covered pixel, and only
//! after the depth pre-test for that pixel passes. Returning `None` from
//! `fragment` discards the pixel: neither the color nor the depth buffer
//! is touched.

use crate::camera::RenderContext;
use crate::color::Color;
use crate::math::{Vec2, Vec3, Vec4};
use crate::texture::Texture;

pub trait Shader {
    /// Transforms an object-space vertex to clip space. Implementations
    /// may stash per-vertex side data under `ivert` (0..3) for later
    /// interpolation in `fragment`.
    fn vertex(&mut self, position: Vec3, normal: Vec3, ivert: usize) -> Vec4;

    /// Computes the color for one covered pixel from its barycentric
    /// weights and interpolated UV. `None` discards the pixel.
    fn fragment(&self, bar: Vec3, uv: Vec2) -> Option<Color>;
}

/// Single color for the whole triangle; no lighting.
pub struct FlatShader<'a> {
    ctx: &'a RenderContext,
    color: Color,
}

impl<'a> FlatShader<'a> {
    pub fn new(ctx: &'a RenderContext, color: Color) -> Self {
        Self { ctx, color }
    }
}

impl Shader for FlatShader<'_> {
    fn vertex(&mut self, position: Vec3, _normal: Vec3, _ivert: usize) -> Vec4 {
        self.ctx.transform(Vec4::from_point(position))
    }

    fn fragment(&self, _bar: Vec3, _uv: Vec2) -> Option<Color> {
        Some(self.color)
    }
}

/// Per-vertex dot-product intensity, interpolated across the face.
pub struct GouraudShader<'a> {
    ctx: &'a RenderContext,
    light_dir: Vec3,
    base: Color,
    // varying: written by vertex, read by fragment
    intensity: Vec3,
}

impl<'a> GouraudShader<'a> {
    pub fn new(ctx: &'a RenderContext, light_dir: Vec3, base: Color) -> Self {
        Self {
            ctx,
            light_dir: light_dir.normalize_or_zero(),
            base,
            intensity: Vec3::ZERO,
        }
    }
}

impl Shader for GouraudShader<'_> {
    fn vertex(&mut self, position: Vec3, normal: Vec3, ivert: usize) -> Vec4 {
        let n = normal.normalize_or_zero();
        self.intensity[ivert] = n.dot(self.light_dir).max(0.0);
        self.ctx.transform(Vec4::from_point(position))
    }

    fn fragment(&self, bar: Vec3, _uv: Vec2) -> Option<Color> {
        let i = bar.dot(self.intensity);
        Some(self.base * i)
    }
}

/// Gouraud intensity modulating a nearest-neighbor texture sample.
pub struct TexturedShader<'a> {
    ctx: &'a RenderContext,
    light_dir: Vec3,
    texture: &'a Texture,
    intensity: Vec3,
}

impl<'a> TexturedShader<'a> {
    pub fn new(ctx: &'a RenderContext, light_dir: Vec3, texture: &'a Texture) -> Self {
        Self {
            ctx,
            light_dir: light_dir.normalize_or_zero(),
            texture,
            intensity: Vec3::ZERO,
        }
    }
}

impl Shader for TexturedShader<'_> {
    fn vertex(&mut self, position: Vec3, normal: Vec3, ivert: usize) -> Vec4 {
        let n = normal.normalize_or_zero();
        self.intensity[ivert] = n.dot(self.light_dir).max(0.0);
        self.ctx.transform(Vec4::from_point(position))
    }

    fn fragment(&self, bar: Vec3, uv: Vec2) -> Option<Color> {
        let i = bar.dot(self.intensity);
        Some(self.texture.sample(uv) * i)
    }
}
