/// Handing decoded images to the driver as textures
use std::path::Path;

use crate::error::Result;
use crate::image::{load_png, DecodedImage};

/// The graphics driver's side of texture creation.
///
/// `upload` receives a fully validated image; the pixel data is only borrowed
/// for the duration of the call.
pub trait TextureUploader {
    type Texture;

    fn upload(&mut self, image: &DecodedImage) -> Self::Texture;
}

/// Decode a PNG file and upload it.
///
/// The uploader is only reached with a valid RGB or RGBA image; any decode
/// failure is returned before the driver is touched.
pub fn load_texture<U: TextureUploader>(
    uploader: &mut U,
    path: impl AsRef<Path>,
) -> Result<U::Texture> {
    let path = path.as_ref();
    let image = load_png(path)?;
    let texture = uploader.upload(&image);
    tracing::debug!(path = %path.display(), width = image.width, height = image.height, "uploaded texture");
    Ok(texture)
}
