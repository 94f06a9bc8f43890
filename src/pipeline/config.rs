use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{
    foundation::{
        core::FitPolicy,
        error::{PosterError, PosterResult},
    },
    source::{generate_content::GenerateContentSource, http::HttpImageSource},
};

/// Where content images come from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceConfig {
    /// Raw image bytes from a prompt-in-path GET endpoint.
    HttpImage(HttpImageSource),
    /// Inline image data from a `generateContent` endpoint.
    GenerateContent(GenerateContentSource),
}

/// Ask a text model to write the image prompt before generating.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PromptRefinement {
    /// Text model endpoint.
    pub text_source: GenerateContentSource,
    /// Instruction sent to the text model. `{prompt}` is replaced with the user prompt.
    pub instruction: String,
}

impl PromptRefinement {
    /// Instruction with the user prompt substituted in.
    pub fn instruction_for(&self, prompt: &str) -> String {
        self.instruction.replace("{prompt}", prompt)
    }
}

/// Everything one poster run needs, passed explicitly to the pipeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PosterConfig {
    /// Frame asset (PNG with alpha).
    pub frame_path: PathBuf,
    /// Where the finished poster is written.
    pub output_path: PathBuf,
    /// How content is scaled against the frame.
    #[serde(default)]
    pub fit: FitPolicy,
    /// When the frame is missing, the unmodified content is saved here if set.
    #[serde(default)]
    pub raw_fallback_path: Option<PathBuf>,
    /// Content source used by `generate`.
    #[serde(default)]
    pub source: Option<SourceConfig>,
    /// Optional prompt refinement step used by `generate`.
    #[serde(default)]
    pub refine: Option<PromptRefinement>,
}

impl PosterConfig {
    /// Config with default fit and no source.
    pub fn new(frame_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            frame_path: frame_path.into(),
            output_path: output_path.into(),
            fit: FitPolicy::default(),
            raw_fallback_path: None,
            source: None,
            refine: None,
        }
    }

    /// Parse a config from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> PosterResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| PosterError::validation(format!("parse poster config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config file. Relative paths inside it resolve against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> PosterResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PosterError::validation(format!("open poster config '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_reader(BufReader::new(f))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(cfg.resolve_relative_to(base))
    }

    /// Check paths and fit policy.
    pub fn validate(&self) -> PosterResult<()> {
        if self.frame_path.as_os_str().is_empty() {
            return Err(PosterError::validation("frame_path must not be empty"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(PosterError::validation("output_path must not be empty"));
        }
        if self.output_path == self.frame_path {
            return Err(PosterError::validation(
                "output_path must differ from frame_path",
            ));
        }
        self.fit.validate()
    }

    /// Rebase every relative path onto `base`.
    pub fn resolve_relative_to(mut self, base: &Path) -> Self {
        let rebase = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.frame_path = rebase(self.frame_path);
        self.output_path = rebase(self.output_path);
        self.raw_fallback_path = self.raw_fallback_path.map(rebase);
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/config.rs"]
mod tests;
