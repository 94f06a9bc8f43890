use image::RgbaImage;

/// Pixel-space box with exclusive `right`/`bottom`, like a crop rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AlphaBBox {
    /// Leftmost column with non-zero alpha.
    pub left: u32,
    /// Topmost row with non-zero alpha.
    pub top: u32,
    /// One past the rightmost column with non-zero alpha.
    pub right: u32,
    /// One past the bottom row with non-zero alpha.
    pub bottom: u32,
}

/// Minimum and maximum alpha over the whole image. Empty images report `(255, 255)`.
pub fn alpha_extrema(img: &RgbaImage) -> (u8, u8) {
    let mut iter = img.pixels().map(|p| p.0[3]);
    let Some(first) = iter.next() else {
        return (255, 255);
    };
    iter.fold((first, first), |(lo, hi), a| (lo.min(a), hi.max(a)))
}

/// Bounding box of all pixels with non-zero alpha, or `None` when everything is transparent.
pub fn alpha_bbox(img: &RgbaImage) -> Option<AlphaBBox> {
    let mut bbox: Option<AlphaBBox> = None;
    for (x, y, px) in img.enumerate_pixels() {
        if px.0[3] == 0 {
            continue;
        }
        let b = bbox.get_or_insert(AlphaBBox {
            left: x,
            top: y,
            right: x + 1,
            bottom: y + 1,
        });
        b.left = b.left.min(x);
        b.top = b.top.min(y);
        b.right = b.right.max(x + 1);
        b.bottom = b.bottom.max(y + 1);
    }
    bbox
}

#[cfg(test)]
#[path = "../../tests/unit/calibrate/alpha.rs"]
mod tests;
