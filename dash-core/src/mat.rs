/// 4x4 matrices and the affine transform builders
use bytemuck::{Pod, Zeroable};
use std::ops::{Index, IndexMut, Mul, MulAssign};

use crate::vec::{Vec3, Vec4};

/// Offset of `(row, col)` in column-major storage
///
/// Panics unless both `row` and `col` are below 4.
const fn offset(row: usize, col: usize) -> usize {
    assert!(row < 4 && col < 4, "matrix position out of range");
    col * 4 + row
}

/// A 4x4 `f32` matrix stored column-major, the layout a GL driver expects for
/// uniform upload.
///
/// Entries are addressed as `m[(row, col)]`; the storage order only shows up
/// in [`Mat4::to_cols_array`] and [`Mat4::as_bytes`]. Indexing outside
/// `0..4` on either axis panics, like a slice.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    data: [f32; 16],
}

impl Mat4 {
    pub const ZERO: Self = Self { data: [0.0; 16] };

    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Build from column-major storage
    pub const fn from_cols_array(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Build from rows, written the way the matrix reads on paper
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut m = Self::ZERO;
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                m[(r, c)] = *value;
            }
        }
        m
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self[(row, col)]
    }

    /// Like [`Mat4::get`], `None` outside the matrix
    pub fn try_get(&self, row: usize, col: usize) -> Option<f32> {
        (row < 4 && col < 4).then(|| self.data[col * 4 + row])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self[(row, col)] = value;
    }

    pub fn row(&self, row: usize) -> Vec4 {
        Vec4::new(
            self[(row, 0)],
            self[(row, 1)],
            self[(row, 2)],
            self[(row, 3)],
        )
    }

    pub fn col(&self, col: usize) -> Vec4 {
        Vec4::new(
            self[(0, col)],
            self[(1, col)],
            self[(2, col)],
            self[(3, col)],
        )
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        self.data
    }

    /// Raw bytes in column-major order, ready for a uniform upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::ZERO;
        for r in 0..4 {
            for c in 0..4 {
                out[(c, r)] = self[(r, c)];
            }
        }
        out
    }

    /// Matrix product `self · other`.
    ///
    /// The result is accumulated in a fresh matrix, so chaining
    /// `m = m.multiply(&x)` never reads a partially written entry.
    pub fn multiply(&self, other: &Self) -> Self {
        let mut out = Self::ZERO;
        for r in 0..4 {
            for c in 0..4 {
                out[(r, c)] = self[(r, 0)] * other[(0, c)]
                    + self[(r, 1)] * other[(1, c)]
                    + self[(r, 2)] * other[(2, c)]
                    + self[(r, 3)] * other[(3, c)];
            }
        }
        out
    }

    pub fn mul_vec4(&self, v: Vec4) -> Vec4 {
        Vec4::new(
            self.row(0).dot(v),
            self.row(1).dot(v),
            self.row(2).dot(v),
            self.row(3).dot(v),
        )
    }

    /// Apply to a point (w = 1) and divide by the resulting w
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.mul_vec4(point.extend(1.0)).project()
    }

    /// Apply to a direction (w = 0); translation has no effect
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.mul_vec4(vector.extend(0.0)).truncate()
    }

    /// Affine translation by `t`
    pub fn translate(t: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m[(0, 3)] = t.x;
        m[(1, 3)] = t.y;
        m[(2, 3)] = t.z;
        m
    }

    /// Non-uniform scale along each axis
    pub fn scale(s: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m[(0, 0)] = s.x;
        m[(1, 1)] = s.y;
        m[(2, 2)] = s.z;
        m
    }

    /// Right-handed rotation of `angle` radians about +X
    pub fn rotate_x(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, cos, -sin, 0.0],
            [0.0, sin, cos, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed rotation of `angle` radians about +Y
    pub fn rotate_y(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_rows([
            [cos, 0.0, sin, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-sin, 0.0, cos, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed rotation of `angle` radians about +Z
    pub fn rotate_z(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_rows([
            [cos, -sin, 0.0, 0.0],
            [sin, cos, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Composite rotation `Rx(r.x) · Ry(r.y) · Rz(r.z)`.
    ///
    /// Applied to a column vector this rotates about Z first and X last. The
    /// order is part of the contract: content authored against it depends on
    /// the exact gimbal behaviour, so it must not be changed.
    pub fn rotate(r: Vec3) -> Self {
        Self::rotate_x(r.x)
            .multiply(&Self::rotate_y(r.y))
            .multiply(&Self::rotate_z(r.z))
    }

    /// Model matrix `translate(position) · rotate(rotation) · scale(scale)`
    pub fn transform(scale: Vec3, position: Vec3, rotation: Vec3) -> Self {
        Self::translate(position)
            .multiply(&Self::rotate(rotation))
            .multiply(&Self::scale(scale))
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<(usize, usize)> for Mat4 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.data[offset(row, col)]
    }
}

impl IndexMut<(usize, usize)> for Mat4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.data[offset(row, col)]
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<&Mat4> for &Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: &Mat4) -> Mat4 {
        self.multiply(rhs)
    }
}

impl MulAssign for Mat4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Vec4 {
        self.mul_vec4(rhs)
    }
}
