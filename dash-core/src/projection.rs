/// View and projection matrix builders
use thiserror::Error;

use crate::mat::Mat4;
use crate::vec::Vec3;

/// A projection was requested over an empty box.
///
/// Building the matrix anyway would divide by zero, so the builder refuses;
/// whether that aborts the program is the caller's decision.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProjectionError {
    #[error("degenerate {axis} bounds: {min} == {max}")]
    DegenerateBounds {
        axis: &'static str,
        min: f32,
        max: f32,
    },
}

/// Depth interval mapped onto clip-space z in `-1..1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    pub near: f32,
    pub far: f32,
}

impl DepthRange {
    /// The range 2D overlays have always been drawn with
    pub const LEGACY: Self = Self::new(-0.1, 1.0);

    pub const fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }
}

impl Default for DepthRange {
    fn default() -> Self {
        Self::LEGACY
    }
}

/// Axis-aligned box for an orthographic projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl OrthoBounds {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Box anchored at the origin: `0..width` by `0..height`
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, width, height, 0.0)
    }
}

fn check_extent(axis: &'static str, min: f32, max: f32) -> Result<f32, ProjectionError> {
    if min == max {
        return Err(ProjectionError::DegenerateBounds { axis, min, max });
    }
    Ok(1.0 / (max - min))
}

impl Mat4 {
    /// Right-handed view matrix looking from `eye` towards `center`.
    ///
    /// The camera basis is `side = forward × up`, `up' = side × forward`,
    /// and the view looks down -Z. If `up` is parallel to the view direction,
    /// or `eye == center`, the basis collapses and the result is NaN.
    pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        let forward = (center - eye).normalize();
        let side = forward.cross(up).normalize();
        let true_up = side.cross(forward);

        let rotation = Self::from_rows([
            [side.x, side.y, side.z, 0.0],
            [true_up.x, true_up.y, true_up.z, 0.0],
            [-forward.x, -forward.y, -forward.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        rotation.multiply(&Self::translate(-eye))
    }

    /// Symmetric perspective frustum with GL depth (`-1..1` after the divide).
    ///
    /// Inputs are not checked: `near == far` or a field of view outside
    /// `(0, π)` produce infinities or a flipped image.
    pub fn perspective(y_fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let a = 1.0 / (y_fov / 2.0).tan();

        let mut m = Self::ZERO;
        m[(0, 0)] = a / aspect;
        m[(1, 1)] = a;
        m[(2, 2)] = -((far + near) / (far - near));
        m[(2, 3)] = -((2.0 * far * near) / (far - near));
        m[(3, 2)] = -1.0;
        m
    }

    /// Map `bounds` × `depth` onto the clip cube.
    pub fn orthographic(bounds: OrthoBounds, depth: DepthRange) -> Result<Self, ProjectionError> {
        let inv_x = check_extent("horizontal", bounds.left, bounds.right)?;
        let inv_y = check_extent("vertical", bounds.bottom, bounds.top)?;
        let inv_z = check_extent("depth", depth.near, depth.far)?;

        let mut m = Self::IDENTITY;
        m[(0, 0)] = 2.0 * inv_x;
        m[(1, 1)] = 2.0 * inv_y;
        m[(2, 2)] = -2.0 * inv_z;
        m[(0, 3)] = -(bounds.right + bounds.left) * inv_x;
        m[(1, 3)] = -(bounds.top + bounds.bottom) * inv_y;
        m[(2, 3)] = -(depth.far + depth.near) * inv_z;
        Ok(m)
    }

    /// Orthographic projection of `0..width` by `0..height`
    pub fn orthographic_size(
        width: f32,
        height: f32,
        depth: DepthRange,
    ) -> Result<Self, ProjectionError> {
        Self::orthographic(OrthoBounds::from_size(width, height), depth)
    }
}
