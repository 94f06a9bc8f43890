use std::collections::BTreeMap;

use image::RgbaImage;
use reqwest::Url;

use crate::{
    assets::decode::decode_image,
    foundation::error::{PosterError, PosterResult},
    source::{ContentSource, blocking_client, default_timeout_secs, read_success_body},
};

/// Placeholder in query values replaced by the request seed.
pub const SEED_PLACEHOLDER: &str = "{seed}";

/// Exclusive upper bound for randomly drawn seeds.
const RANDOM_SEED_MAX: u64 = 1_000_000;

/// Downloads raw image bytes from `GET {base_url}/{prompt}?{params}`.
///
/// The prompt is appended as a single percent-encoded path segment. Query values equal to
/// or containing [`SEED_PLACEHOLDER`] get the seed substituted in.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HttpImageSource {
    /// Endpoint the prompt segment is appended to.
    pub base_url: String,
    /// Extra query parameters, emitted in key order.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    /// Fixed seed; a random one is drawn per request when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpImageSource {
    fn default() -> Self {
        let params = [
            ("width", "768"),
            ("height", "1024"),
            ("seed", SEED_PLACEHOLDER),
            ("model", "flux"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self {
            base_url: "https://image.pollinations.ai/prompt".to_string(),
            params,
            seed: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HttpImageSource {
    /// Build the request URL for `prompt` using `seed`.
    pub fn request_url(&self, prompt: &str, seed: u64) -> PosterResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            PosterError::validation(format!("invalid base_url '{}': {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                PosterError::validation(format!(
                    "base_url '{}' cannot take path segments",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(prompt);

        if !self.params.is_empty() {
            let seed = seed.to_string();
            let mut q = url.query_pairs_mut();
            for (k, v) in &self.params {
                q.append_pair(k, &v.replace(SEED_PLACEHOLDER, &seed));
            }
        }
        Ok(url)
    }

    fn seed(&self) -> u64 {
        self.seed
            .unwrap_or_else(|| fastrand::u64(0..RANDOM_SEED_MAX))
    }
}

impl ContentSource for HttpImageSource {
    fn name(&self) -> &str {
        "http-image"
    }

    #[tracing::instrument(level = "info", skip(self), fields(source = self.name()))]
    fn fetch(&self, prompt: &str) -> PosterResult<RgbaImage> {
        let url = self.request_url(prompt, self.seed())?;
        tracing::debug!(%url, "requesting image");

        let started = std::time::Instant::now();
        let resp = blocking_client(self.timeout_secs)?
            .get(url)
            .send()
            .map_err(|e| PosterError::source(format!("GET image: {e}")))?;
        let body = read_success_body(resp, "GET image")?;
        let img = decode_image(&body)?;

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            width = img.width(),
            height = img.height(),
            "downloaded content image"
        );
        Ok(img)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/http.rs"]
mod tests;
