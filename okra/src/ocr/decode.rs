use image::{DynamicImage, ImageReader};

use crate::error::{OkraError, Result};

/// Decode uploaded bytes into an in-memory raster image.
///
/// The format is sniffed from the bytes rather than trusted from the
/// declared media type, so a text file renamed to `.png` still fails with
/// a decode error. Supports the common raster formats the engine accepts
/// (PNG, JPEG, BMP, TIFF, and the rest of the `image` crate's defaults).
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let reader = ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| OkraError::Decode(format!("Failed to read image: {e}")))?;

    reader
        .decode()
        .map_err(|e| OkraError::Decode(format!("Failed to decode image: {e}")))
}
