use image::{RgbaImage, imageops::FilterType};

use crate::{
    assets::decode::ensure_non_empty,
    foundation::{
        core::FitPolicy,
        error::{PosterError, PosterResult},
    },
};

/// Resample filter used for every fit. Lanczos keeps downscales free of aliasing.
pub const FIT_FILTER: FilterType = FilterType::Lanczos3;

/// Scale `content` against a `frame_width x frame_height` frame according to `policy`.
///
/// - [`FitPolicy::FullBleed`] resamples each axis independently to the exact frame size.
/// - [`FitPolicy::Contain`] shrinks into the policy's target box preserving aspect ratio and
///   returns an unchanged copy when the content already fits.
///
/// Always returns a new image; `content` is never modified.
#[tracing::instrument(level = "debug", skip(content), fields(src_w = content.width(), src_h = content.height()))]
pub fn resize_for_fit(
    content: &RgbaImage,
    frame_width: u32,
    frame_height: u32,
    policy: FitPolicy,
) -> PosterResult<RgbaImage> {
    ensure_non_empty(content)?;
    let target = policy.target_box(frame_width, frame_height)?;

    let size = match policy {
        FitPolicy::FullBleed => target,
        FitPolicy::Contain { .. } => match contain_size(content.dimensions(), target)? {
            Some(size) => size,
            None => return Ok(content.clone()),
        },
    };

    if size == content.dimensions() {
        return Ok(content.clone());
    }
    tracing::debug!(width = size.0, height = size.1, "resampling content");
    Ok(image::imageops::resize(content, size.0, size.1, FIT_FILTER))
}

/// Size of `src` shrunk to fit inside `target` with its aspect ratio preserved.
///
/// Returns `None` when `src` already fits in both axes. The bound axis lands exactly on the
/// target; the free axis picks whichever of floor/ceil keeps the aspect ratio closer
/// (floor on ties) and never drops below one pixel.
pub fn contain_size(src: (u32, u32), target: (u32, u32)) -> PosterResult<Option<(u32, u32)>> {
    let (sw, sh) = src;
    let (tw, th) = target;
    if sw == 0 || sh == 0 || tw == 0 || th == 0 {
        return Err(PosterError::invalid_dimensions(format!(
            "contain needs non-empty sizes, got {sw}x{sh} into {tw}x{th}"
        )));
    }
    if tw >= sw && th >= sh {
        return Ok(None);
    }

    let aspect = f64::from(sw) / f64::from(sh);
    let (tw_f, th_f) = (f64::from(tw), f64::from(th));

    let size = if tw_f / th_f >= aspect {
        let w = round_aspect(th_f * aspect, |n| (aspect - n / th_f).abs());
        (w, th)
    } else {
        let h = round_aspect(tw_f / aspect, |n| {
            if n == 0.0 {
                0.0
            } else {
                (aspect - tw_f / n).abs()
            }
        });
        (tw, h)
    };
    Ok(Some(size))
}

fn round_aspect(v: f64, err: impl Fn(f64) -> f64) -> u32 {
    let lo = v.floor();
    let hi = v.ceil();
    let pick = if err(hi) < err(lo) { hi } else { lo };
    pick.clamp(1.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/compose/fit.rs"]
mod tests;
