//! Dash Loader - shader programs and textures for the graphics driver
//!
//! The driver itself stays behind two traits, [`ShaderBackend`] and
//! [`TextureUploader`]. This crate reads files, validates them, and only
//! hands the driver inputs it can use; every failure comes back as a
//! [`LoaderError`] carrying the diagnostic text, and no partial handle is
//! ever returned.

pub mod error;
pub mod image;
pub mod shader;
pub mod texture;

pub use error::{LoaderError, Result};
pub use image::{decode_png, load_png, DecodedImage, PixelFormat};
pub use shader::{load_program, program_from_sources, ShaderBackend, ShaderStage};
pub use texture::{load_texture, TextureUploader};
