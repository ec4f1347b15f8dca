use std::ops::{Add, Index, IndexMut, Mul, Sub};

use super::Vec4;

/// Row-major matrix with dimensions fixed at the type level; incompatible
/// products simply do not typecheck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat<const R: usize, const C: usize> {
    rows: [[f32; C]; R],
}

pub type Mat4 = Mat<4, 4>;

impl<const R: usize, const C: usize> Mat<R, C> {
    pub const fn from_rows(rows: [[f32; C]; R]) -> Self {
        Self { rows }
    }

    pub const fn zeros() -> Self {
        Self { rows: [[0.0; C]; R] }
    }

    pub fn transpose(&self) -> Mat<C, R> {
        let mut out = Mat::<C, R>::zeros();
        for i in 0..R {
            for j in 0..C {
                out[j][i] = self.rows[i][j];
            }
        }
        out
    }
}

impl<const N: usize> Mat<N, N> {
    pub fn identity() -> Self {
        let mut out = Self::zeros();
        for i in 0..N {
            out[i][i] = 1.0;
        }
        out
    }
}

impl<const R: usize, const C: usize> Default for Mat<R, C> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const R: usize, const C: usize> Index<usize> for Mat<R, C> {
    type Output = [f32; C];
    fn index(&self, i: usize) -> &[f32; C] {
        &self.rows[i]
    }
}

impl<const R: usize, const C: usize> IndexMut<usize> for Mat<R, C> {
    fn index_mut(&mut self, i: usize) -> &mut [f32; C] {
        &mut self.rows[i]
    }
}

impl<const R: usize, const C: usize> Add for Mat<R, C> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        for i in 0..R {
            for j in 0..C {
                out.rows[i][j] += rhs.rows[i][j];
            }
        }
        out
    }
}

impl<const R: usize, const C: usize> Sub for Mat<R, C> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let mut out = self;
        for i in 0..R {
            for j in 0..C {
                out.rows[i][j] -= rhs.rows[i][j];
            }
        }
        out
    }
}

impl<const R: usize, const C: usize> Mul<f32> for Mat<R, C> {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        let mut out = self;
        for i in 0..R {
            for j in 0..C {
                out.rows[i][j] *= s;
            }
        }
        out
    }
}

impl<const R: usize, const C: usize, const K: usize> Mul<Mat<C, K>> for Mat<R, C> {
    type Output = Mat<R, K>;
    fn mul(self, rhs: Mat<C, K>) -> Mat<R, K> {
        let mut out = Mat::<R, K>::zeros();
        for i in 0..R {
            for j in 0..K {
                let mut acc = 0.0;
                for k in 0..C {
                    acc += self.rows[i][k] * rhs.rows[k][j];
                }
                out[i][j] = acc;
            }
        }
        out
    }
}

// A column vector is a 4x1 matrix; spelled out for the one shape the
// pipeline actually multiplies.
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        let mut out = Vec4::ZERO;
        for i in 0..4 {
            out[i] = self.rows[i][0] * v.x
                + self.rows[i][1] * v.y
                + self.rows[i][2] * v.z
                + self.rows[i][3] * v.w;
        }
        out
    }
}
