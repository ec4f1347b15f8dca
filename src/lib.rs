//! A software 3D rasterizer: vector/matrix algebra, a camera transform
//! chain, a programmable two-stage shading interface, and a barycentric
//! triangle rasterizer with depth testing.

pub mod camera;
pub mod color;
pub mod framebuffer;
pub mod math;
pub mod model;
pub mod rasterizer;
pub mod shader;
pub mod texture;

pub use camera::{model_view, projection, viewport, OrbitCamera, RenderContext};
pub use color::Color;
pub use framebuffer::Framebuffer;
pub use math::{Mat, Mat4, Vec2, Vec3, Vec4};
pub use model::Model;
pub use shader::{FlatShader, GouraudShader, Shader, TexturedShader};
pub use texture::Texture;
