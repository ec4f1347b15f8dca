//! Fixed-size vector and matrix types for the render pipeline.
//!
//! Everything here is a plain `Copy` value on the stack; the rasterizer
//! runs these operations per vertex and per pixel, so no allocation and
//! no shared ownership anywhere.

mod matrix;
mod vector;

pub use matrix::{Mat, Mat4};
pub use vector::{Vec2, Vec3, Vec4};

pub const EPSILON: f32 = 1e-6;
