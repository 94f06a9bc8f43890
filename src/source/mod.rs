//! Content acquisition.
//!
//! A [`ContentSource`] turns a prompt into an in-memory image. The compositor never sees
//! how the image was obtained.

use std::time::Duration;

use image::RgbaImage;

use crate::foundation::error::{PosterError, PosterResult};

pub mod generate_content;
pub mod http;

/// Request timeout used when a source config does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub(crate) fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Something that produces a content image for a prompt.
pub trait ContentSource {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Generate or download an image for `prompt`, normalized to RGBA8.
    fn fetch(&self, prompt: &str) -> PosterResult<RgbaImage>;
}

/// Something that answers a text prompt with text.
pub trait TextSource {
    /// Ask for a text completion of `prompt`.
    fn generate_text(&self, prompt: &str) -> PosterResult<String>;
}

/// Ask `source` to write an image prompt, falling back to `fallback` on any failure.
///
/// Refinement is best-effort: errors and blank answers are logged, never returned.
pub fn refine_prompt(source: &dyn TextSource, instruction: &str, fallback: &str) -> String {
    match source.generate_text(instruction) {
        Ok(text) if !text.trim().is_empty() => {
            let text = text.trim().to_string();
            tracing::info!(prompt = %text, "using refined prompt");
            text
        }
        Ok(_) => {
            tracing::warn!("prompt refinement returned no text, using fallback prompt");
            fallback.to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "prompt refinement failed, using fallback prompt");
            fallback.to_string()
        }
    }
}

pub(crate) fn blocking_client(timeout_secs: u64) -> PosterResult<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| PosterError::source(format!("build http client: {e}")))
}

pub(crate) fn read_success_body(
    resp: reqwest::blocking::Response,
    what: &str,
) -> PosterResult<Vec<u8>> {
    let status = resp.status();
    let body = resp
        .bytes()
        .map_err(|e| PosterError::source(format!("{what}: read body: {e}")))?;
    if !status.is_success() {
        let snippet: String = String::from_utf8_lossy(&body).chars().take(200).collect();
        return Err(PosterError::source(format!(
            "{what}: http {status}: {snippet}"
        )));
    }
    Ok(body.to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/source/refine.rs"]
mod tests;
