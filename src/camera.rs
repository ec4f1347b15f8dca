//! Camera transform builders and the per-frame render context.
//!
//! The three matrices are independent pure functions of their inputs and
//! get threaded explicitly through the pipeline instead of living in
//! globals, so repeated renders with different cameras cannot interfere.

use crate::math::{Mat4, Vec3, Vec4};

/// Camera-space basis from eye point, look-at target and up hint.
///
/// Precondition: `eye != target` and `up` not parallel to the eye-target
/// axis; a degenerate input yields a degenerate basis (zero rows), which
/// the caller must avoid. Not runtime-checked.
pub fn model_view(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let z = (eye - target).normalize_or_zero();
    let x = up.cross(z).normalize_or_zero();
    let y = z.cross(x).normalize_or_zero();
    Mat4::from_rows([
        [x.x, x.y, x.z, -x.dot(eye)],
        [y.x, y.y, y.z, -y.dot(eye)],
        [z.x, z.y, z.z, -z.dot(eye)],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Pinhole perspective: identity with the w-row coefficient set, so the
/// perspective divide happens through the homogeneous w component.
/// `coeff` is conventionally `-1 / focal_distance`.
pub fn projection(coeff: f32) -> Mat4 {
    let mut m = Mat4::identity();
    m[3][2] = coeff;
    m
}

/// Maps the canonical [-1,1] cube onto a `w` x `h` pixel box offset by
/// `(x, y)`, passing depth through unchanged.
pub fn viewport(x: f32, y: f32, w: f32, h: f32) -> Mat4 {
    Mat4::from_rows([
        [w / 2.0, 0.0, 0.0, x + w / 2.0],
        [0.0, h / 2.0, 0.0, y + h / 2.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// The per-frame transform chain, rebuilt whenever camera parameters
/// change and passed by reference into the vertex stage.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub model_view: Mat4,
    pub projection: Mat4,
    pub viewport: Mat4,
}

impl RenderContext {
    pub fn new(model_view: Mat4, projection: Mat4, viewport: Mat4) -> Self {
        Self { model_view, projection, viewport }
    }

    /// Applies the fixed composition `viewport * projection * model_view`.
    pub fn transform(&self, p: Vec4) -> Vec4 {
        self.viewport * (self.projection * (self.model_view * p))
    }
}

/// Orbit camera for the interactive driver: spherical coordinates around
/// a fixed target.
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
}

impl OrbitCamera {
    pub fn new(target: Vec3, radius: f32) -> Self {
        Self { target, yaw: std::f32::consts::FRAC_PI_2, pitch: 0.3, radius }
    }

    pub fn eye(&self) -> Vec3 {
        let cp = self.pitch.cos();
        let dir = Vec3::new(self.yaw.cos() * cp, self.pitch.sin(), self.yaw.sin() * cp);
        self.target + dir * self.radius
    }

    pub fn orbit(&mut self, dyaw: f32, dpitch: f32) {
        self.yaw = (self.yaw + dyaw) % std::f32::consts::TAU;
        // Keep away from the poles so up never goes parallel to the view axis
        self.pitch = (self.pitch + dpitch).clamp(-1.55, 1.55);
    }

    pub fn dolly(&mut self, dr: f32) {
        self.radius = (self.radius + dr).clamp(0.5, 100.0);
    }
}
