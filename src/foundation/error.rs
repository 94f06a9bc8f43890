use std::path::PathBuf;

/// Convenience result type used across posterframe.
pub type PosterResult<T> = Result<T, PosterError>;

/// Top-level error taxonomy used by compositing and acquisition APIs.
#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    /// A target size, scale factor, or image dimension is zero, negative, or not finite.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Pixel data could not be normalized to RGBA8.
    #[error("incompatible format: {0}")]
    IncompatibleFormat(String),

    /// A required asset file does not exist.
    #[error("missing asset: '{}'", path.display())]
    MissingAsset {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The content source failed to produce an image.
    #[error("content source error: {0}")]
    Source(String),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    /// Build a [`PosterError::InvalidDimensions`] value.
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    /// Build a [`PosterError::IncompatibleFormat`] value.
    pub fn incompatible_format(msg: impl Into<String>) -> Self {
        Self::IncompatibleFormat(msg.into())
    }

    /// Build a [`PosterError::MissingAsset`] value.
    pub fn missing_asset(path: impl Into<PathBuf>) -> Self {
        Self::MissingAsset { path: path.into() }
    }

    /// Build a [`PosterError::Source`] value.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Build a [`PosterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Return `true` for [`PosterError::MissingAsset`].
    pub fn is_missing_asset(&self) -> bool {
        matches!(self, Self::MissingAsset { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
