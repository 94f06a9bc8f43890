use super::*;
use crate::{PosterError, source::TextSource};

struct Fixed(RgbaImage);

impl ContentSource for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }

    fn fetch(&self, _prompt: &str) -> PosterResult<RgbaImage> {
        Ok(self.0.clone())
    }
}

struct Failing;

impl ContentSource for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn fetch(&self, _prompt: &str) -> PosterResult<RgbaImage> {
        Err(PosterError::source("http 503"))
    }
}

struct Echo;

impl TextSource for Echo {
    fn generate_text(&self, prompt: &str) -> PosterResult<String> {
        Ok(format!("refined {prompt}"))
    }
}

struct RecordingSource(std::cell::RefCell<Vec<String>>, RgbaImage);

impl ContentSource for RecordingSource {
    fn name(&self) -> &str {
        "recording"
    }

    fn fetch(&self, prompt: &str) -> PosterResult<RgbaImage> {
        self.0.borrow_mut().push(prompt.to_string());
        Ok(self.1.clone())
    }
}

fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba(px))
}

// Resampling a flat color may land a unit off after float rounding.
fn assert_close(got: [u8; 4], want: [u8; 4]) {
    for i in 0..4 {
        assert!(got[i].abs_diff(want[i]) <= 1, "{got:?} vs {want:?}");
    }
}

#[test]
fn render_poster_keeps_frame_size() {
    let frame = solid(40, 60, [0, 0, 255, 255]);
    for content in [solid(400, 100, [255, 0, 0, 255]), solid(3, 5, [255, 0, 0, 255])] {
        for fit in [FitPolicy::FullBleed, FitPolicy::contain(0.85).unwrap()] {
            let out = render_poster(&frame, &content, fit).unwrap();
            assert_eq!(out.dimensions(), (40, 60));
        }
    }
}

#[test]
fn compose_poster_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let frame_path = dir.path().join("frame.png");
    save_png(&solid(8, 8, [0, 0, 255, 255]), &frame_path).unwrap();

    let cfg = PosterConfig {
        fit: FitPolicy::contain(0.5).unwrap(),
        ..PosterConfig::new(&frame_path, dir.path().join("out").join("poster.png"))
    };
    let written = compose_poster(&cfg, &solid(16, 16, [255, 0, 0, 255])).unwrap();
    assert_eq!(written, cfg.output_path);

    let out = load_frame(&written).unwrap();
    assert_eq!(out.dimensions(), (8, 8));
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 255, 255]);
    assert_close(out.get_pixel(4, 4).0, [255, 0, 0, 255]);
}

#[test]
fn missing_frame_saves_raw_fallback_only() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = PosterConfig {
        raw_fallback_path: Some(dir.path().join("raw.png")),
        ..PosterConfig::new(dir.path().join("absent.png"), dir.path().join("out.png"))
    };
    let content = solid(5, 7, [1, 2, 3, 255]);

    let err = compose_poster(&cfg, &content).unwrap_err();
    assert!(err.is_missing_asset());
    assert!(!cfg.output_path.exists());
    assert_eq!(load_frame(dir.path().join("raw.png")).unwrap(), content);
}

#[test]
fn generate_poster_propagates_source_failure() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = PosterConfig::new(dir.path().join("frame.png"), dir.path().join("out.png"));
    let err = generate_poster(&cfg, &Failing, "prompt").unwrap_err();
    assert!(matches!(err, PosterError::Source(_)));
    assert!(!cfg.output_path.exists());
}

#[test]
fn generate_poster_uses_source_image() {
    let dir = tempfile::tempdir().unwrap();
    let frame_path = dir.path().join("frame.png");
    save_png(&solid(4, 4, [0, 0, 255, 255]), &frame_path).unwrap();
    let cfg = PosterConfig {
        fit: FitPolicy::FullBleed,
        ..PosterConfig::new(&frame_path, dir.path().join("out.png"))
    };

    let path = generate_poster(&cfg, &Fixed(solid(2, 2, [0, 255, 0, 255])), "p").unwrap();
    let out = load_frame(path).unwrap();
    for px in out.pixels() {
        assert_close(px.0, [0, 255, 0, 255]);
    }
}

#[test]
fn refined_prompt_reaches_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let frame_path = dir.path().join("frame.png");
    save_png(&solid(4, 4, [0, 0, 255, 255]), &frame_path).unwrap();
    let cfg = PosterConfig::new(&frame_path, dir.path().join("out.png"));

    let source = RecordingSource(Default::default(), solid(2, 2, [0, 255, 0, 255]));
    generate_poster_refined(&cfg, &source, &Echo, "about Naruto", "fallback").unwrap();
    assert_eq!(*source.0.borrow(), vec!["refined about Naruto".to_string()]);
}
