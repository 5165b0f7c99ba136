/// Three- and four-component vectors
use bytemuck::{Pod, Zeroable};
use std::ops::{Add, Mul, Neg, Sub};

/// A three-component vector of `f32`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise `self - other`
    pub fn subtract(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Right-handed cross product `self × other`
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Scale to unit length.
    ///
    /// The zero vector is not special-cased: the reciprocal of a zero norm is
    /// infinite, so every component of the result comes out NaN. Callers are
    /// expected to pass a non-zero vector.
    pub fn normalize(self) -> Self {
        let inv = 1.0 / self.length();
        Self::new(self.x * inv, self.y * inv, self.z * inv)
    }

    /// Promote to a homogeneous vector with the given `w`
    pub fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// A homogeneous four-component vector
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Drop `w` without dividing
    pub fn truncate(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Perspective divide: `(x, y, z) / w`
    pub fn project(self) -> Vec3 {
        Vec3::new(self.x / self.w, self.y / self.w, self.z / self.w)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl From<[f32; 4]> for Vec4 {
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f32 = 1e-5;

    fn random_vec(rng: &mut StdRng) -> Vec3 {
        Vec3::new(
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        )
    }

    #[test]
    fn test_subtract() {
        let a = Vec3::new(3.0, 5.0, -1.0);
        let b = Vec3::new(1.0, 7.0, 2.0);
        assert_eq!(a - b, Vec3::new(2.0, -2.0, -3.0));
        assert_eq!(a.subtract(b), a - b);
    }

    #[test]
    fn test_cross_basis() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
        assert_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
        assert_eq!(Vec3::Y.cross(Vec3::X), -Vec3::Z);
    }

    #[test]
    fn test_cross_is_orthogonal() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let a = random_vec(&mut rng);
            let b = random_vec(&mut rng);
            let c = a.cross(b);
            // scale tolerance with magnitude, components go up to ~10
            let tol = 1e-4 * (1.0 + a.length() * b.length() * a.length().max(b.length()));
            assert!(c.dot(a).abs() < tol, "cross·a = {}", c.dot(a));
            assert!(c.dot(b).abs() < tol, "cross·b = {}", c.dot(b));
        }
    }

    #[test]
    fn test_normalize_unit_length() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let v = random_vec(&mut rng);
            if v.length() < 1e-3 {
                continue;
            }
            assert!((v.normalize().length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_normalize_zero_is_nan() {
        let n = Vec3::ZERO.normalize();
        assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
    }

    #[test]
    fn test_project_divides_by_w() {
        let v = Vec4::new(2.0, 4.0, -6.0, 2.0);
        assert_eq!(v.project(), Vec3::new(1.0, 2.0, -3.0));
        assert_eq!(v.truncate(), Vec3::new(2.0, 4.0, -6.0));
    }
}
