use image::RgbaImage;

use crate::foundation::error::{PosterError, PosterResult};

/// Decode encoded image bytes (PNG, JPEG, WebP) and normalize to straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> PosterResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PosterError::incompatible_format(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    ensure_non_empty(&rgba)?;
    Ok(rgba)
}

/// Wrap tightly packed, row-major RGBA8 bytes as an image.
pub fn rgba_from_raw(width: u32, height: u32, bytes: Vec<u8>) -> PosterResult<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(PosterError::invalid_dimensions(format!(
            "image dimensions must be > 0, got {width}x{height}"
        )));
    }
    let len = bytes.len();
    RgbaImage::from_raw(width, height, bytes).ok_or_else(|| {
        PosterError::incompatible_format(format!(
            "{len} bytes is not a {width}x{height} rgba8 buffer"
        ))
    })
}

pub(crate) fn ensure_non_empty(img: &RgbaImage) -> PosterResult<()> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(PosterError::invalid_dimensions(format!(
            "image dimensions must be > 0, got {w}x{h}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
