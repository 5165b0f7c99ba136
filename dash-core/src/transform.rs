/// Model transforms built from scale, position and Euler rotation
use crate::mat::Mat4;
use crate::vec::Vec3;

/// Placement of a model in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, composed as `Rx · Ry · Rz`
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::new(1.0, 1.0, 1.0),
    };

    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotation = self.rotation + Vec3::new(dx, dy, dz);
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::transform(self.scale, self.position, self.rotation)
    }

    /// Create a model-view-projection matrix
    pub fn mvp(model: &Mat4, view: &Mat4, projection: &Mat4) -> Mat4 {
        projection * &(view * model)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
