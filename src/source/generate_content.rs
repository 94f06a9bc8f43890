use base64::Engine as _;
use image::RgbaImage;
use reqwest::Url;

use crate::{
    assets::decode::decode_image,
    foundation::error::{PosterError, PosterResult},
    source::{ContentSource, TextSource, blocking_client, default_timeout_secs, read_success_body},
};

/// Request body for a `generateContent` call.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GenerateContentRequest {
    /// Conversation turns; a single user turn for our purposes.
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single-turn request carrying `text`.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(text.into()),
                    inline_data: None,
                }],
            }],
        }
    }
}

/// Response body of a `generateContent` call. Unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates, best first.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct Candidate {
    /// Candidate payload; absent when generation was blocked.
    #[serde(default)]
    pub content: Option<Content>,
}

/// Ordered list of parts.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Content {
    /// Text and inline-data parts in order.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Text or inline binary data.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Base64 encoded binary payload.
    #[serde(default, alias = "inline_data", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Base64 encoded blob with its media type.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// Media type such as `image/png`.
    #[serde(default, alias = "mime_type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Standard base64 payload.
    #[serde(default)]
    pub data: String,
}

/// Decoded inline image bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineImage {
    /// Media type reported by the response, if any.
    pub mime_type: Option<String>,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

fn parts(resp: &GenerateContentResponse) -> impl Iterator<Item = &Part> {
    resp.candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| c.parts.iter())
}

/// First non-empty inline data part, base64-decoded.
pub fn extract_inline_image(resp: &GenerateContentResponse) -> PosterResult<Option<InlineImage>> {
    let Some(inline) = parts(resp)
        .filter_map(|p| p.inline_data.as_ref())
        .find(|d| !d.data.is_empty())
    else {
        return Ok(None);
    };
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(inline.data.as_bytes())
        .map_err(|e| PosterError::source(format!("inline image base64 decode failed: {e}")))?;
    Ok(Some(InlineImage {
        mime_type: inline.mime_type.clone(),
        bytes,
    }))
}

/// First text part of the response.
pub fn first_text(resp: &GenerateContentResponse) -> Option<&str> {
    parts(resp).find_map(|p| p.text.as_deref())
}

/// Calls a `generateContent` endpoint and reads images from inline data parts.
#[derive(Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GenerateContentSource {
    /// Full method URL, e.g. `.../v1beta/models/<model>:generateContent`.
    pub endpoint: String,
    /// Sent as the `key` query parameter when set.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Text prepended to every image prompt.
    #[serde(default = "default_image_prompt_prefix")]
    pub image_prompt_prefix: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_image_prompt_prefix() -> String {
    "Generate an image of ".to_string()
}

impl std::fmt::Debug for GenerateContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateContentSource")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("image_prompt_prefix", &self.image_prompt_prefix)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GenerateContentSource {
    /// Source for `endpoint` with default prefix and timeout.
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            image_prompt_prefix: default_image_prompt_prefix(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Endpoint URL with the API key attached.
    pub fn request_url(&self) -> PosterResult<Url> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            PosterError::validation(format!("invalid endpoint '{}': {e}", self.endpoint))
        })?;
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    /// POST `text` and parse the response.
    pub fn call(&self, text: &str) -> PosterResult<GenerateContentResponse> {
        let body = GenerateContentRequest::from_text(text);
        let resp = blocking_client(self.timeout_secs)?
            .post(self.request_url()?)
            .json(&body)
            .send()
            .map_err(|e| PosterError::source(format!("generateContent: {e}")))?;
        let bytes = read_success_body(resp, "generateContent")?;
        serde_json::from_slice(&bytes)
            .map_err(|e| PosterError::source(format!("generateContent: parse response: {e}")))
    }
}

impl ContentSource for GenerateContentSource {
    fn name(&self) -> &str {
        "generate-content"
    }

    #[tracing::instrument(level = "info", skip(self), fields(source = self.name()))]
    fn fetch(&self, prompt: &str) -> PosterResult<RgbaImage> {
        let resp = self.call(&format!("{}{prompt}", self.image_prompt_prefix))?;
        let Some(inline) = extract_inline_image(&resp)? else {
            let said: String = first_text(&resp)
                .unwrap_or_default()
                .chars()
                .take(200)
                .collect();
            return Err(PosterError::source(format!(
                "no inline image data in response (text: {said:?})"
            )));
        };
        tracing::debug!(
            mime_type = inline.mime_type.as_deref().unwrap_or("unknown"),
            len = inline.bytes.len(),
            "decoded inline image"
        );
        decode_image(&inline.bytes)
    }
}

impl TextSource for GenerateContentSource {
    fn generate_text(&self, prompt: &str) -> PosterResult<String> {
        let resp = self.call(prompt)?;
        first_text(&resp)
            .map(str::to_string)
            .ok_or_else(|| PosterError::source("no text part in response"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/generate_content.rs"]
mod tests;
