use image::RgbaImage;

use crate::calibrate::{
    alpha::{AlphaBBox, alpha_bbox, alpha_extrema},
    bounds::{OpaqueBounds, detect_opaque_bounds},
};

/// Everything the calibration tooling prints about a frame asset.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameReport {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// `width / height`.
    pub aspect_ratio: f64,
    /// Minimum alpha over the frame.
    pub min_alpha: u8,
    /// Maximum alpha over the frame.
    pub max_alpha: u8,
    /// `true` when at least one pixel is not fully opaque.
    pub has_transparency: bool,
    /// Bounding box of the non-transparent pixels.
    pub alpha_bbox: Option<AlphaBBox>,
    /// Near-white region along the centerlines.
    pub centerline_bounds: OpaqueBounds,
    /// Straight RGBA at `(width / 2, height / 2)`.
    pub center_pixel: [u8; 4],
}

impl FrameReport {
    /// Inspect `frame` using `white_threshold` for the centerline scan.
    pub fn from_image(frame: &RgbaImage, white_threshold: u8) -> Self {
        let (width, height) = frame.dimensions();
        let (min_alpha, max_alpha) = alpha_extrema(frame);
        let center_pixel = if width == 0 || height == 0 {
            [0; 4]
        } else {
            frame.get_pixel(width / 2, height / 2).0
        };
        Self {
            width,
            height,
            aspect_ratio: if height == 0 {
                0.0
            } else {
                f64::from(width) / f64::from(height)
            },
            min_alpha,
            max_alpha,
            has_transparency: min_alpha < 255,
            alpha_bbox: alpha_bbox(frame),
            centerline_bounds: detect_opaque_bounds(frame, white_threshold),
            center_pixel,
        }
    }
}

impl std::fmt::Display for FrameReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let b = &self.centerline_bounds;
        writeln!(f, "frame: {}x{}", self.width, self.height)?;
        writeln!(f, "aspect ratio: {:.2}", self.aspect_ratio)?;
        writeln!(f, "alpha extrema: ({}, {})", self.min_alpha, self.max_alpha)?;
        match (self.has_transparency, self.alpha_bbox) {
            (true, Some(bb)) => writeln!(
                f,
                "transparent pixels: yes, visible bbox ({}, {}, {}, {})",
                bb.left, bb.top, bb.right, bb.bottom
            )?,
            (true, None) => writeln!(f, "transparent pixels: yes, fully transparent")?,
            (false, _) => writeln!(f, "transparent pixels: no")?,
        }
        writeln!(
            f,
            "white area: left {} right {} top {} bottom {} ({}x{})",
            b.left,
            b.right,
            b.top,
            b.bottom,
            b.width(),
            b.height()
        )?;
        write!(f, "center pixel: {:?}", self.center_pixel)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/calibrate/report.rs"]
mod tests;
