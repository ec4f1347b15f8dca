//! Nearest-neighbor texture sampling over an `image`-decoded bitmap.

use std::error::Error;
use std::path::Path;

use log::info;

use crate::color::Color;
use crate::math::Vec2;

pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let img = image::open(path.as_ref())?.to_rgb8();
        let (width, height) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| Color::new(p.0[0], p.0[1], p.0[2]))
            .collect();
        info!("loaded texture {:?}: {}x{}", path.as_ref(), width, height);
        Ok(Self { width, height, pixels })
    }

    /// Solid 1x1 texture, handy as a stand-in when no file is given.
    pub fn solid(color: Color) -> Self {
        Self { width: 1, height: 1, pixels: vec![color] }
    }

    /// Nearest-neighbor sample. UV components are fractions of the
    /// texture dimensions, clamped to [0, 1]; v runs bottom-up as in the
    /// OBJ convention, so it is flipped to image row order here.
    pub fn sample(&self, uv: Vec2) -> Color {
        let u = uv.x.clamp(0.0, 1.0);
        let v = 1.0 - uv.y.clamp(0.0, 1.0);
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Texture {
        // 2x2: top row red/green, bottom row blue/white in image order
        Texture {
            width: 2,
            height: 2,
            pixels: vec![
                Color::RED,
                Color::new(0, 255, 0),
                Color::new(0, 0, 255),
                Color::WHITE,
            ],
        }
    }

    #[test]
    fn sample_corners_nearest() {
        let t = checker();
        // v=1 is the top image row
        assert_eq!(t.sample(Vec2::new(0.0, 1.0)), Color::RED);
        assert_eq!(t.sample(Vec2::new(0.9, 1.0)), Color::new(0, 255, 0));
        assert_eq!(t.sample(Vec2::new(0.0, 0.0)), Color::new(0, 0, 255));
        assert_eq!(t.sample(Vec2::new(0.9, 0.1)), Color::WHITE);
    }

    #[test]
    fn sample_clamps_out_of_range_uv() {
        let t = checker();
        assert_eq!(t.sample(Vec2::new(-3.0, 5.0)), Color::RED);
        assert_eq!(t.sample(Vec2::new(7.0, -2.0)), Color::WHITE);
    }

    #[test]
    fn solid_texture_is_uniform() {
        let t = Texture::solid(Color::new(9, 9, 9));
        assert_eq!(t.sample(Vec2::new(0.3, 0.8)), Color::new(9, 9, 9));
    }
}
