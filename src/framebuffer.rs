use crate::color::Color;

/// Color plane plus depth plane for one frame.
///
/// Depth uses a single convention throughout: larger stored value means
/// nearer to the camera, and the empty sentinel is negative infinity. The
/// rasterizer is the only writer of the depth plane.
///
/// Pixel coordinates are a caller contract: `set`, `pixel`, `depth_at` and
/// `set_depth` panic on out-of-range input instead of clamping. Staying in
/// bounds is the rasterizer's job via its bounding-box clamp.
pub struct Framebuffer {
    width: usize,
    height: usize,
    color: Vec<u32>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color: vec![0; width * height],
            depth: vec![f32::NEG_INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Resets both planes for a new frame.
    pub fn clear(&mut self, color: Color) {
        self.color.fill(color.to_hex());
        self.depth.fill(f32::NEG_INFINITY);
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} framebuffer",
            self.width,
            self.height
        );
        y * self.width + x
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        let idx = self.index(x, y);
        self.color[idx] = color.to_hex();
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        Color::from_hex(self.color[self.index(x, y)])
    }

    #[inline]
    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.depth[self.index(x, y)]
    }

    #[inline]
    pub fn set_depth(&mut self, x: usize, y: usize, depth: f32) {
        let idx = self.index(x, y);
        self.depth[idx] = depth;
    }

    /// Raw 0RGB pixels, row-major, for handing to the window or encoder.
    pub fn data(&self) -> &[u32] {
        &self.color
    }
}
