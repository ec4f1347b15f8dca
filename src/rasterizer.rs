//! Triangle rasterization with barycentric interpolation and depth
//! testing.
//!
//! One call fills one triangle: bounding box over the screen projection,
//! inside test per pixel center, perspective-corrected depth against the
//! framebuffer's depth plane, then the shader's fragment stage for the
//! survivors. Degenerate input (zero area, non-finite projection, zero
//! perspective divisor) is skipped locally and never aborts the frame.

use crate::framebuffer::Framebuffer;
use crate::math::{Vec2, Vec3, Vec4, EPSILON};
use crate::shader::Shader;

/// Signed double area of (a, b, c); sign carries winding.
#[inline]
fn edge(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)
}

/// Barycentric weights of `p` against the 2D triangle (a, b, c), any
/// winding. `None` when the triangle area is (near) zero.
fn barycentric(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> Option<Vec3> {
    let area = edge(a, b, c);
    if area.abs() < EPSILON {
        return None;
    }
    let w0 = edge(b, c, p) / area;
    let w1 = edge(c, a, p) / area;
    let w2 = edge(a, b, p) / area;
    Some(Vec3::new(w0, w1, w2))
}

/// Rasterizes one triangle given its three clip-space points (viewport
/// already composed in) and per-vertex UVs.
pub fn triangle(
    pts: [Vec4; 3],
    uvs: [Vec2; 3],
    shader: &dyn Shader,
    fb: &mut Framebuffer,
) {
    // Screen projection of each vertex; a zero perspective divisor makes
    // the whole primitive degenerate.
    let mut screen = [Vec2::ZERO; 3];
    for i in 0..3 {
        let Some(p) = pts[i].to_point() else { return };
        if !p.x.is_finite() || !p.y.is_finite() {
            return;
        }
        screen[i] = Vec2::new(p.x, p.y);
    }

    let area = edge(screen[0], screen[1], screen[2]);
    if area.abs() < EPSILON {
        return;
    }

    let (w, h) = (fb.width(), fb.height());
    let min_x = screen[0].x.min(screen[1].x).min(screen[2].x).floor() as i64;
    let min_y = screen[0].y.min(screen[1].y).min(screen[2].y).floor() as i64;
    let max_x = screen[0].x.max(screen[1].x).max(screen[2].x).ceil() as i64;
    let max_y = screen[0].y.max(screen[1].y).max(screen[2].y).ceil() as i64;
    if max_x < 0 || max_y < 0 || min_x >= w as i64 || min_y >= h as i64 {
        return;
    }
    let min_x = min_x.max(0) as usize;
    let min_y = min_y.max(0) as usize;
    let max_x = (max_x as usize).min(w - 1);
    let max_y = (max_y as usize).min(h - 1);

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
            let Some(bar) = barycentric(screen[0], screen[1], screen[2], p) else {
                continue;
            };
            // Negative weight: outside. Exactly zero sits on an edge and
            // is kept (inclusive edges; shared edges may double-shade).
            if bar.x < 0.0 || bar.y < 0.0 || bar.z < 0.0 {
                continue;
            }

            // Perspective-corrected depth: interpolate clip z and w
            // separately, divide once.
            let z = pts[0].z * bar.x + pts[1].z * bar.y + pts[2].z * bar.z;
            let wsum = pts[0].w * bar.x + pts[1].w * bar.y + pts[2].w * bar.z;
            if wsum.abs() < EPSILON {
                continue;
            }
            let depth = z / wsum;

            // Larger stored depth is nearer; empty sentinel is -inf.
            if depth <= fb.depth_at(px, py) {
                continue;
            }

            let uv = uvs[0] * bar.x + uvs[1] * bar.y + uvs[2] * bar.z;
            if let Some(color) = shader.fragment(bar, uv) {
                fb.set_depth(px, py, depth);
                fb.set(px, py, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    struct Solid(Color);

    impl Shader for Solid {
        fn vertex(&mut self, p: Vec3, _n: Vec3, _i: usize) -> Vec4 {
            Vec4::from_point(p)
        }
        fn fragment(&self, _bar: Vec3, _uv: Vec2) -> Option<Color> {
            Some(self.0)
        }
    }

    fn screen_pt(x: f32, y: f32, z: f32) -> Vec4 {
        Vec4::new(x, y, z, 1.0)
    }

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).norm() < 1e-5
    }

    #[test]
    fn barycentric_of_vertices() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let c = Vec2::new(0.0, 10.0);
        assert!(approx(barycentric(a, b, c, a).unwrap(), Vec3::new(1.0, 0.0, 0.0)));
        assert!(approx(barycentric(a, b, c, b).unwrap(), Vec3::new(0.0, 1.0, 0.0)));
        assert!(approx(barycentric(a, b, c, c).unwrap(), Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn barycentric_of_centroid() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(9.0, 0.0);
        let c = Vec2::new(3.0, 6.0);
        let centroid = (a + b + c) / 3.0;
        let third = 1.0 / 3.0;
        assert!(approx(
            barycentric(a, b, c, centroid).unwrap(),
            Vec3::new(third, third, third)
        ));
    }

    #[test]
    fn barycentric_detects_outside_points() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let c = Vec2::new(0.0, 10.0);
        let bar = barycentric(a, b, c, Vec2::new(20.0, 20.0)).unwrap();
        assert!(bar.x < 0.0 || bar.y < 0.0 || bar.z < 0.0);
    }

    #[test]
    fn barycentric_rejects_degenerate_triangle() {
        let a = Vec2::new(1.0, 1.0);
        assert!(barycentric(a, a, a, Vec2::ZERO).is_none());
    }

    #[test]
    fn pixel_count_tracks_triangle_area() {
        let mut fb = Framebuffer::new(100, 100);
        let pts = [
            screen_pt(10.0, 10.0, 0.0),
            screen_pt(50.0, 10.0, 0.0),
            screen_pt(30.0, 50.0, 0.0),
        ];
        triangle(pts, [Vec2::ZERO; 3], &Solid(Color::WHITE), &mut fb);
        let covered = fb
            .data()
            .iter()
            .filter(|&&p| p == Color::WHITE.to_hex())
            .count();
        // Geometric area is 800; discretization wobbles by the perimeter.
        let expected = 800.0;
        assert!(
            (covered as f32 - expected).abs() < 80.0,
            "covered {covered} pixels"
        );
    }

    #[test]
    fn degenerate_triangle_shades_nothing() {
        let mut fb = Framebuffer::new(64, 64);
        let p = screen_pt(20.0, 20.0, 0.0);
        triangle([p, p, p], [Vec2::ZERO; 3], &Solid(Color::WHITE), &mut fb);
        assert!(fb.data().iter().all(|&px| px == 0));
    }

    #[test]
    fn offscreen_triangle_is_clamped_away() {
        let mut fb = Framebuffer::new(32, 32);
        let pts = [
            screen_pt(-100.0, -100.0, 0.0),
            screen_pt(-50.0, -100.0, 0.0),
            screen_pt(-75.0, -50.0, 0.0),
        ];
        triangle(pts, [Vec2::ZERO; 3], &Solid(Color::WHITE), &mut fb);
        assert!(fb.data().iter().all(|&px| px == 0));
    }

    #[test]
    fn partially_offscreen_triangle_fills_visible_part() {
        let mut fb = Framebuffer::new(32, 32);
        let pts = [
            screen_pt(-10.0, 5.0, 0.0),
            screen_pt(20.0, 5.0, 0.0),
            screen_pt(5.0, 25.0, 0.0),
        ];
        triangle(pts, [Vec2::ZERO; 3], &Solid(Color::WHITE), &mut fb);
        let covered = fb.data().iter().filter(|&&p| p != 0).count();
        assert!(covered > 0);
    }

    #[test]
    fn zero_perspective_divisor_skips_triangle() {
        let mut fb = Framebuffer::new(32, 32);
        let pts = [
            Vec4::new(5.0, 5.0, 0.0, 0.0),
            Vec4::new(20.0, 5.0, 0.0, 1.0),
            Vec4::new(5.0, 20.0, 0.0, 1.0),
        ];
        triangle(pts, [Vec2::ZERO; 3], &Solid(Color::WHITE), &mut fb);
        assert!(fb.data().iter().all(|&px| px == 0));
    }

    #[test]
    fn winding_does_not_matter() {
        let mut fb_ccw = Framebuffer::new(64, 64);
        let mut fb_cw = Framebuffer::new(64, 64);
        let a = screen_pt(10.0, 10.0, 0.0);
        let b = screen_pt(50.0, 10.0, 0.0);
        let c = screen_pt(30.0, 50.0, 0.0);
        triangle([a, b, c], [Vec2::ZERO; 3], &Solid(Color::WHITE), &mut fb_ccw);
        triangle([a, c, b], [Vec2::ZERO; 3], &Solid(Color::WHITE), &mut fb_cw);
        assert_eq!(fb_ccw.data(), fb_cw.data());
    }
}
