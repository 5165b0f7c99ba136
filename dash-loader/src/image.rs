/// PNG decoding into tightly packed RGB / RGBA byte buffers
use std::path::Path;

use zune_png::PngDecoder;

use crate::error::{LoaderError, Result};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Signature, IHDR length and type, 13 bytes of IHDR data, CRC
const HEADER_LEN: usize = 8 + 8 + 13 + 4;

/// Colour type byte from the IHDR chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngColorType {
    Grayscale,
    Rgb,
    Palette,
    GrayscaleAlpha,
    Rgba,
}

impl PngColorType {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Grayscale),
            2 => Some(Self::Rgb),
            3 => Some(Self::Palette),
            4 => Some(Self::GrayscaleAlpha),
            6 => Some(Self::Rgba),
            _ => None,
        }
    }
}

/// The fields of IHDR that decide whether an image is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: PngColorType,
}

/// Pixel layout of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Row-major 8-bit pixels, `width * height * channels` bytes, top row first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels()
    }

    /// Pixels of row `y`, `None` past the last row
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.row_len();
        self.pixels.get(start..start + self.row_len())
    }
}

/// Check the signature and read IHDR
pub fn read_header(bytes: &[u8]) -> Result<PngHeader> {
    if bytes.len() < HEADER_LEN {
        return Err(LoaderError::MalformedHeader("file too short"));
    }
    if bytes[..8] != PNG_SIGNATURE {
        return Err(LoaderError::MalformedHeader("not a PNG file"));
    }

    let chunk_len = u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
    if &bytes[12..16] != b"IHDR" || chunk_len != 13 {
        return Err(LoaderError::MalformedHeader("first chunk is not IHDR"));
    }

    let ihdr = &bytes[16..29];
    let width = u32::from_be_bytes([ihdr[0], ihdr[1], ihdr[2], ihdr[3]]);
    let height = u32::from_be_bytes([ihdr[4], ihdr[5], ihdr[6], ihdr[7]]);
    if width == 0 || height == 0 {
        return Err(LoaderError::MalformedHeader("zero image dimension"));
    }

    let color_type = PngColorType::from_byte(ihdr[9])
        .ok_or(LoaderError::MalformedHeader("unknown colour type"))?;

    Ok(PngHeader {
        width,
        height,
        bit_depth: ihdr[8],
        color_type,
    })
}

/// Decode a PNG held in memory.
///
/// Only 8-bit RGB and RGBA are accepted. Grayscale, grayscale with alpha,
/// palette images and other bit depths are refused rather than converted.
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage> {
    let header = read_header(bytes)?;

    let format = match header.color_type {
        PngColorType::Rgb => PixelFormat::Rgb,
        PngColorType::Rgba => PixelFormat::Rgba,
        PngColorType::Grayscale => {
            return Err(LoaderError::UnsupportedFormat("grayscale".to_string()))
        }
        PngColorType::GrayscaleAlpha => {
            return Err(LoaderError::UnsupportedFormat(
                "grayscale with alpha".to_string(),
            ))
        }
        PngColorType::Palette => {
            return Err(LoaderError::UnsupportedFormat(
                "palette lookup table".to_string(),
            ))
        }
    };
    if header.bit_depth != 8 {
        return Err(LoaderError::UnsupportedFormat(format!(
            "{}-bit channels",
            header.bit_depth
        )));
    }

    let mut decoder = PngDecoder::new(bytes);
    let pixels = decoder
        .decode_raw()
        .map_err(|e| LoaderError::Decode(format!("{e:?}")))?;

    let expected = header.width as usize * header.height as usize * format.channels();
    if pixels.len() != expected {
        return Err(LoaderError::Decode(format!(
            "expected {expected} bytes of pixel data, got {}",
            pixels.len()
        )));
    }

    tracing::debug!(
        width = header.width,
        height = header.height,
        ?format,
        "decoded png"
    );

    Ok(DecodedImage {
        width: header.width,
        height: header.height,
        format,
        pixels,
    })
}

/// Read and decode a PNG file
pub fn load_png(path: impl AsRef<Path>) -> Result<DecodedImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_png(&bytes).inspect_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "could not load png");
    })
}
