use std::path::PathBuf;

use image::RgbaImage;

use crate::{
    assets::io::{load_frame, save_png},
    compose::{composite::composite, fit::resize_for_fit},
    foundation::{core::FitPolicy, error::PosterResult},
    pipeline::config::PosterConfig,
    source::{ContentSource, TextSource, refine_prompt},
};

/// Fit `content` against `frame` and composite it. Pure; nothing touches disk.
pub fn render_poster(
    frame: &RgbaImage,
    content: &RgbaImage,
    fit: FitPolicy,
) -> PosterResult<RgbaImage> {
    let fitted = resize_for_fit(content, frame.width(), frame.height(), fit)?;
    composite(frame, &fitted)
}

/// Load the configured frame, composite `content` into it and write the poster.
///
/// The output file is only written after the whole composite succeeded. When the frame
/// asset is missing and `raw_fallback_path` is set, the unmodified content is saved there
/// before the [`crate::PosterError::MissingAsset`] is returned.
#[tracing::instrument(
    skip(config, content),
    fields(frame = %config.frame_path.display(), out = %config.output_path.display())
)]
pub fn compose_poster(config: &PosterConfig, content: &RgbaImage) -> PosterResult<PathBuf> {
    let frame = match load_frame(&config.frame_path) {
        Ok(frame) => frame,
        Err(e) if e.is_missing_asset() => {
            save_raw_fallback(config, content);
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    let poster = render_poster(&frame, content, config.fit)?;
    save_png(&poster, &config.output_path)?;
    Ok(config.output_path.clone())
}

fn save_raw_fallback(config: &PosterConfig, content: &RgbaImage) {
    let Some(raw) = &config.raw_fallback_path else {
        return;
    };
    match save_png(content, raw) {
        Ok(()) => tracing::warn!(
            path = %raw.display(),
            "frame asset missing, saved raw content instead"
        ),
        Err(e) => tracing::warn!(
            path = %raw.display(),
            error = %e,
            "frame asset missing and raw content could not be saved"
        ),
    }
}

/// Fetch content for `prompt` from `source` and run [`compose_poster`].
#[tracing::instrument(skip(config, source), fields(source_name = source.name()))]
pub fn generate_poster(
    config: &PosterConfig,
    source: &dyn ContentSource,
    prompt: &str,
) -> PosterResult<PathBuf> {
    let content = source.fetch(prompt)?;
    tracing::info!(
        width = content.width(),
        height = content.height(),
        "content image ready"
    );
    compose_poster(config, &content)
}

/// Refine `prompt` with `text` (falling back to `prompt` itself) and run [`generate_poster`].
pub fn generate_poster_refined(
    config: &PosterConfig,
    source: &dyn ContentSource,
    text: &dyn TextSource,
    instruction: &str,
    prompt: &str,
) -> PosterResult<PathBuf> {
    let prompt = refine_prompt(text, instruction, prompt);
    generate_poster(config, source, &prompt)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/poster.rs"]
mod tests;
