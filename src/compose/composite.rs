use image::RgbaImage;

use crate::{
    assets::decode::ensure_non_empty,
    foundation::{
        core::Offset,
        error::PosterResult,
        math::{mul_div255_u8, premultiply, unpremultiply},
    },
};

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Offset that centers `content` inside `frame`.
pub fn centered_offset(frame: &RgbaImage, content: &RgbaImage) -> Offset {
    Offset::centered(frame.dimensions(), content.dimensions())
}

/// Paint `content` centered over a copy of `frame`.
///
/// `content` must already be sized by [`crate::resize_for_fit`]; nothing is resampled here.
/// Content larger than the frame is cropped at the frame edges, so the result always has
/// the frame's dimensions.
pub fn composite(frame: &RgbaImage, content: &RgbaImage) -> PosterResult<RgbaImage> {
    composite_at(frame, content, centered_offset(frame, content))
}

/// Paint `content` over a copy of `frame` with its top-left corner at `offset`.
pub fn composite_at(
    frame: &RgbaImage,
    content: &RgbaImage,
    offset: Offset,
) -> PosterResult<RgbaImage> {
    ensure_non_empty(frame)?;
    ensure_non_empty(content)?;

    let mut out = frame.clone();
    let painted = over_in_place(&mut out, content, offset);
    tracing::debug!(
        x = offset.x,
        y = offset.y,
        painted,
        "composited content onto frame"
    );
    Ok(out)
}

/// Blend `src` over `dst` at `offset`, clipping to `dst`. Returns the painted pixel count.
fn over_in_place(dst: &mut RgbaImage, src: &RgbaImage, offset: Offset) -> u64 {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = offset.x.max(0);
    let y0 = offset.y.max(0);
    let x1 = offset.x.saturating_add(sw).min(dw);
    let y1 = offset.y.saturating_add(sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return 0;
    }

    for y in y0..y1 {
        for x in x0..x1 {
            // In range by construction of the clip rectangle above.
            let s = src.get_pixel((x - offset.x) as u32, (y - offset.y) as u32).0;
            let d = dst.get_pixel_mut(x as u32, y as u32);
            d.0 = over(d.0, s);
        }
    }
    ((x1 - x0) * (y1 - y0)) as u64
}

/// Porter-Duff "over" for straight-alpha pixels.
///
/// For an opaque destination this is `src * a + dst * (1 - a)` per channel.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }
    unpremultiply(over_premul(premultiply(dst), premultiply(src)))
}

fn over_premul(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composite.rs"]
mod tests;
