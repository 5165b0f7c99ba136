/// Camera and projection utilities
use crate::mat::Mat4;
use crate::projection::{DepthRange, OrthoBounds, ProjectionError};
use crate::vec::Vec3;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Orthographic => Self::Perspective,
            Self::Perspective => Self::Orthographic,
        }
    }
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.eye, self.target, self.up)
    }

    /// Create the projection matrix.
    ///
    /// In orthographic mode the visible box is as tall as the eye is far from
    /// the target, so switching modes keeps the subject roughly the same size.
    pub fn projection_matrix(&self) -> Result<Mat4, ProjectionError> {
        match self.mode {
            ProjectionMode::Perspective => {
                Ok(Mat4::perspective(self.fov, self.aspect, self.near, self.far))
            }
            ProjectionMode::Orthographic => {
                let height = (self.eye - self.target).length();
                let width = height * self.aspect;
                Mat4::orthographic(
                    OrthoBounds::new(-width / 2.0, width / 2.0, height / 2.0, -height / 2.0),
                    DepthRange::new(self.near, self.far),
                )
            }
        }
    }

    pub fn view_projection(&self) -> Result<Mat4, ProjectionError> {
        Ok(self.projection_matrix()? * self.view_matrix())
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Builds the full model-view-projection matrix for one point; renderers
    /// projecting many points should build it once and use [`project_point`].
    pub fn project_to_screen(
        &self,
        point: Vec3,
        model_matrix: &Mat4,
        width: u32,
        height: u32,
    ) -> Result<Option<(f32, f32, f32)>, ProjectionError> {
        let mvp = self.view_projection()? * *model_matrix;
        Ok(project_point(&mvp, point, width, height))
    }
}

/// Map a point through `mvp` to a `width` x `height` viewport.
///
/// Returns `(x, y, depth)` with `y` growing downwards, or `None` when the
/// point falls outside the clip square or behind the eye.
pub fn project_point(mvp: &Mat4, point: Vec3, width: u32, height: u32) -> Option<(f32, f32, f32)> {
    let clip = *mvp * point.extend(1.0);

    // Prevent division by near-zero w, and reject points behind the eye
    if clip.w < 1e-6 {
        return None;
    }

    let ndc = clip.project();
    if !(-1.0..=1.0).contains(&ndc.x) || !(-1.0..=1.0).contains(&ndc.y) {
        return None;
    }

    let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
    let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

    Some((screen_x, screen_y, ndc.z))
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
