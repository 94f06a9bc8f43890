use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use image::RgbaImage;

use crate::{
    assets::decode::decode_image,
    foundation::error::{PosterError, PosterResult},
};

/// Load the frame asset from disk as straight RGBA8.
///
/// A nonexistent path is reported as [`PosterError::MissingAsset`] so callers can tell it
/// apart from an unreadable or undecodable file.
pub fn load_frame(path: impl AsRef<Path>) -> PosterResult<RgbaImage> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PosterError::missing_asset(path));
    }
    let bytes = std::fs::read(path).with_context(|| format!("read frame '{}'", path.display()))?;
    let frame = decode_image(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        width = frame.width(),
        height = frame.height(),
        "loaded frame asset"
    );
    Ok(frame)
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> PosterResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Encode `img` as PNG at `path`.
///
/// Bytes go to a sibling temporary file that is renamed over `path` only after the encoder
/// and flush succeed, so a failed export never leaves a truncated PNG behind.
pub fn save_png(img: &RgbaImage, path: impl AsRef<Path>) -> PosterResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let tmp = staging_path(path);
    let written = write_png(img, &tmp);
    if let Err(e) = written {
        match std::fs::remove_file(&tmp) {
            Err(rm) if rm.kind() != std::io::ErrorKind::NotFound => tracing::debug!(
                path = %tmp.display(),
                error = %rm,
                "could not remove staging file"
            ),
            _ => {}
        }
        return Err(e);
    }
    std::fs::rename(&tmp, path).with_context(|| {
        format!(
            "move '{}' into place at '{}'",
            tmp.display(),
            path.display()
        )
    })?;
    tracing::info!(path = %path.display(), width = img.width(), height = img.height(), "wrote png");
    Ok(())
}

fn write_png(img: &RgbaImage, path: &Path) -> PosterResult<()> {
    let file = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    let mut out = BufWriter::new(file);
    img.write_to(&mut out, image::ImageFormat::Png)
        .with_context(|| format!("encode png '{}'", path.display()))?;
    out.flush()
        .with_context(|| format!("flush '{}'", path.display()))?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/io.rs"]
mod tests;
