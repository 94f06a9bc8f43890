use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba(px))
}

#[test]
fn load_frame_missing_path_is_missing_asset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.png");
    let err = load_frame(&path).unwrap_err();
    assert!(err.is_missing_asset());
}

#[test]
fn load_frame_undecodable_is_incompatible() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    std::fs::write(&path, b"not a png").unwrap();
    assert!(matches!(
        load_frame(&path),
        Err(PosterError::IncompatibleFormat(_))
    ));
}

#[test]
fn save_png_then_load_frame_preserves_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("out.png");
    let img = solid(3, 2, [9, 8, 7, 200]);

    save_png(&img, &path).unwrap();
    assert!(!staging_path(&path).exists());

    let back = load_frame(&path).unwrap();
    assert_eq!(back, img);
}

#[test]
fn failed_save_reports_error_and_writes_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    // A directory squatting on the staging name makes both create and cleanup fail.
    std::fs::create_dir(staging_path(&path)).unwrap();

    let err = save_png(&solid(2, 2, [1, 2, 3, 255]), &path).unwrap_err();
    assert!(matches!(err, PosterError::Other(_)), "{err:?}");
    assert!(!path.exists());
    assert!(staging_path(&path).is_dir());
}

#[test]
fn staging_path_is_a_sibling() {
    let p = Path::new("out/poster.png");
    assert_eq!(staging_path(p), Path::new("out/poster.png.partial"));
}
