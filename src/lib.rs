//! posterframe places generated artwork inside a decorative poster frame.
//!
//! # Pipeline overview
//!
//! 1. **Acquire**: a [`ContentSource`] turns a prompt into an RGBA image (HTTP download or
//!    inline data from a `generateContent` response).
//! 2. **Fit**: [`resize_for_fit`] scales the content against the frame per [`FitPolicy`].
//! 3. **Composite**: [`composite`] centers the fitted content on a copy of the frame with
//!    straight-alpha "over" blending. The result always has the frame's dimensions.
//! 4. **Export**: [`save_png`] writes the poster, never leaving a partial file behind.
//!
//! [`compose_poster`] and [`generate_poster`] run these steps from a [`PosterConfig`].
//! The calibration helpers ([`detect_opaque_bounds`], [`FrameReport`]) inspect a frame
//! asset by hand and are not used by the pipeline itself.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure transforms**: fitting and compositing never mutate their inputs.
//! - **Explicit configuration**: paths, policy and endpoints travel in [`PosterConfig`];
//!   there is no process-wide state.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod calibrate;
mod compose;
mod foundation;
mod pipeline;
mod source;

pub use assets::decode::{decode_image, rgba_from_raw};
pub use assets::io::{ensure_parent_dir, load_frame, save_png};
pub use calibrate::alpha::{AlphaBBox, alpha_bbox, alpha_extrema};
pub use calibrate::bounds::{DEFAULT_WHITE_THRESHOLD, OpaqueBounds, detect_opaque_bounds};
pub use calibrate::report::FrameReport;
pub use compose::composite::{Rgba8, centered_offset, composite, composite_at, over};
pub use compose::fit::{FIT_FILTER, contain_size, resize_for_fit};
pub use foundation::core::{DEFAULT_CONTAIN_SCALE, FitPolicy, Offset};
pub use foundation::error::{PosterError, PosterResult};
pub use pipeline::config::{PosterConfig, PromptRefinement, SourceConfig};
pub use pipeline::poster::{
    compose_poster, generate_poster, generate_poster_refined, render_poster,
};
pub use source::generate_content::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerateContentSource,
    InlineData, InlineImage, Part, extract_inline_image, first_text,
};
pub use source::http::{HttpImageSource, SEED_PLACEHOLDER};
pub use source::{ContentSource, DEFAULT_TIMEOUT_SECS, TextSource, refine_prompt};

/// Re-export of the pixel buffer type every API here works with.
pub use image::RgbaImage;
