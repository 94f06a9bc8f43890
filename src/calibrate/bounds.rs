use image::RgbaImage;

/// Channel value every RGB component must exceed to count as near-white.
pub const DEFAULT_WHITE_THRESHOLD: u8 = 240;

/// Near-white extent found along the frame's two centerlines.
///
/// `left`/`right` come from the horizontal centerline and `top`/`bottom` from the vertical
/// one. All four are inclusive pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OpaqueBounds {
    /// First near-white column on row `height / 2`.
    pub left: u32,
    /// Last near-white column on row `height / 2`.
    pub right: u32,
    /// First near-white row on column `width / 2`.
    pub top: u32,
    /// Last near-white row on column `width / 2`.
    pub bottom: u32,
}

impl OpaqueBounds {
    /// `right - left`, matching how the calibration output has always been reported.
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// `bottom - top`.
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Scan the horizontal and vertical centerlines of `img` for near-white pixels.
///
/// A pixel matches when its R, G and B channels all exceed `white_threshold`; alpha is
/// ignored. When a scan finds nothing, that bound stays on the image edge.
///
/// Only the two centerlines are inspected, so the result is approximate for holes that are
/// off-center or not rectangular.
pub fn detect_opaque_bounds(img: &RgbaImage, white_threshold: u8) -> OpaqueBounds {
    let (w, h) = img.dimensions();
    let mut bounds = OpaqueBounds {
        left: 0,
        right: w.saturating_sub(1),
        top: 0,
        bottom: h.saturating_sub(1),
    };
    if w == 0 || h == 0 {
        return bounds;
    }

    let white = |x: u32, y: u32| is_white(img.get_pixel(x, y).0, white_threshold);
    let (mid_x, mid_y) = (w / 2, h / 2);

    if let Some(x) = (0..w).find(|&x| white(x, mid_y)) {
        bounds.left = x;
    }
    if let Some(x) = (0..w).rev().find(|&x| white(x, mid_y)) {
        bounds.right = x;
    }
    if let Some(y) = (0..h).find(|&y| white(mid_x, y)) {
        bounds.top = y;
    }
    if let Some(y) = (0..h).rev().find(|&y| white(mid_x, y)) {
        bounds.bottom = y;
    }
    bounds
}

fn is_white(px: [u8; 4], threshold: u8) -> bool {
    px[0] > threshold && px[1] > threshold && px[2] > threshold
}

#[cfg(test)]
#[path = "../../tests/unit/calibrate/bounds.rs"]
mod tests;
