//! Dash Core Library - value-type 3D math for driving a GL pipeline
//!
//! Vectors, column-major 4x4 matrices, and the model / view / projection
//! builders a renderer composes every frame. Everything here is a pure
//! function over `Copy` values; nothing allocates and nothing is shared.
//!
//! Numeric degeneracy is not trapped: normalizing a zero vector, a look-at
//! with `eye == center`, or a perspective with `near == far` propagate NaN or
//! infinity. Only orthographic bounds are checked, see [`ProjectionError`].

pub mod camera;
pub mod mat;
pub mod projection;
pub mod transform;
pub mod vec;

// Re-export commonly used types
pub use camera::{Camera, ProjectionMode};
pub use mat::Mat4;
pub use projection::{DepthRange, OrthoBounds, ProjectionError};
pub use transform::Transform;
pub use vec::{Vec3, Vec4};
