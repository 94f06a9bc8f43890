use crate::foundation::error::{PosterError, PosterResult};

/// Scale factor used by [`FitPolicy::default`].
pub const DEFAULT_CONTAIN_SCALE: f64 = 0.85;

/// How content is scaled against the frame before placement.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitPolicy {
    /// Stretch content to exactly the frame's dimensions (aspect ratio not preserved).
    FullBleed,
    /// Shrink content to fit inside `scale x frame` while preserving aspect ratio.
    ///
    /// Content that already fits is left untouched; this policy never enlarges.
    Contain {
        /// Fraction of the frame dimensions used as the target box, must be > 0.
        scale: f64,
    },
}

impl Default for FitPolicy {
    fn default() -> Self {
        Self::Contain {
            scale: DEFAULT_CONTAIN_SCALE,
        }
    }
}

impl FitPolicy {
    /// Build a validated [`FitPolicy::Contain`].
    pub fn contain(scale: f64) -> PosterResult<Self> {
        let policy = Self::Contain { scale };
        policy.validate()?;
        Ok(policy)
    }

    /// Reject non-finite or non-positive scale factors.
    pub fn validate(self) -> PosterResult<()> {
        match self {
            Self::FullBleed => Ok(()),
            Self::Contain { scale } => {
                if !scale.is_finite() || scale <= 0.0 {
                    return Err(PosterError::invalid_dimensions(format!(
                        "contain scale must be finite and > 0, got {scale}"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Box the content must fit into for a frame of `frame_width x frame_height`.
    ///
    /// `Contain` floors each scaled side and keeps it at least one pixel.
    pub fn target_box(self, frame_width: u32, frame_height: u32) -> PosterResult<(u32, u32)> {
        if frame_width == 0 || frame_height == 0 {
            return Err(PosterError::invalid_dimensions(format!(
                "frame dimensions must be > 0, got {frame_width}x{frame_height}"
            )));
        }
        self.validate()?;
        match self {
            Self::FullBleed => Ok((frame_width, frame_height)),
            Self::Contain { scale } => {
                let w = (f64::from(frame_width) * scale).floor();
                let h = (f64::from(frame_height) * scale).floor();
                Ok((clamp_side(w), clamp_side(h)))
            }
        }
    }
}

fn clamp_side(v: f64) -> u32 {
    v.clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Top-left placement of content relative to the frame origin.
///
/// Negative components mean the content hangs over the frame edge and is cropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Offset {
    /// Horizontal offset in pixels.
    pub x: i64,
    /// Vertical offset in pixels.
    pub y: i64,
}

impl Offset {
    /// Offset that centers a `content` sized box inside a `frame` sized box.
    ///
    /// Uses floor division, so odd remainders round toward the top-left and oversize
    /// content yields negative offsets.
    pub fn centered(frame: (u32, u32), content: (u32, u32)) -> Self {
        let dx = i64::from(frame.0) - i64::from(content.0);
        let dy = i64::from(frame.1) - i64::from(content.1);
        Self {
            x: dx.div_euclid(2),
            y: dy.div_euclid(2),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
