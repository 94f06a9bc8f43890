use super::*;

fn checker(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgba([255, 255, 255, 255])
        } else {
            image::Rgba([0, 0, 0, 255])
        }
    })
}

#[test]
fn full_bleed_forces_exact_frame_size() {
    let src = checker(400, 100);
    let out = resize_for_fit(&src, 768, 1024, FitPolicy::FullBleed).unwrap();
    assert_eq!(out.dimensions(), (768, 1024));
}

#[test]
fn full_bleed_same_size_is_a_copy() {
    let src = checker(8, 6);
    let out = resize_for_fit(&src, 8, 6, FitPolicy::FullBleed).unwrap();
    assert_eq!(out, src);
}

#[test]
fn contain_never_enlarges() {
    let src = checker(100, 100);
    let out = resize_for_fit(&src, 768, 1024, FitPolicy::contain(0.85).unwrap()).unwrap();
    assert_eq!(out, src);

    let out = resize_for_fit(&src, 768, 1024, FitPolicy::contain(1.0).unwrap()).unwrap();
    assert_eq!(out.dimensions(), (100, 100));
}

#[test]
fn contain_preserves_aspect_width_bound() {
    let src = checker(1000, 500);
    let out = resize_for_fit(&src, 768, 1024, FitPolicy::contain(0.85).unwrap()).unwrap();
    assert_eq!(out.dimensions(), (652, 326));
}

#[test]
fn contain_box_uses_full_precision_scale() {
    let src = checker(2000, 1000);
    let out = resize_for_fit(&src, 1000, 1000, FitPolicy::contain(0.7).unwrap()).unwrap();
    assert_eq!(out.dimensions(), (700, 350));
}

#[test]
fn contain_preserves_aspect_height_bound() {
    let src = checker(400, 2000);
    let out = resize_for_fit(&src, 768, 1024, FitPolicy::contain(0.85).unwrap()).unwrap();
    assert_eq!(out.dimensions(), (174, 870));
}

#[test]
fn contain_shrinks_when_only_one_axis_overflows() {
    // Fits horizontally, too tall vertically.
    assert_eq!(
        contain_size((600, 1000), (652, 870)).unwrap(),
        Some((522, 870))
    );
}

#[test]
fn contain_size_never_hits_zero() {
    assert_eq!(contain_size((10_000, 1), (10, 10)).unwrap(), Some((10, 1)));
}

#[test]
fn contain_size_already_fits() {
    assert_eq!(contain_size((652, 870), (652, 870)).unwrap(), None);
}

#[test]
fn invalid_inputs_are_rejected() {
    let src = checker(4, 4);
    assert!(matches!(
        resize_for_fit(&src, 0, 10, FitPolicy::FullBleed),
        Err(PosterError::InvalidDimensions(_))
    ));
    assert!(matches!(
        resize_for_fit(&src, 10, 10, FitPolicy::Contain { scale: 0.0 }),
        Err(PosterError::InvalidDimensions(_))
    ));
    assert!(matches!(
        resize_for_fit(&src, 10, 10, FitPolicy::Contain { scale: -1.0 }),
        Err(PosterError::InvalidDimensions(_))
    ));
}

#[test]
fn resize_does_not_touch_input() {
    let src = checker(64, 32);
    let before = src.clone();
    let _ = resize_for_fit(&src, 16, 16, FitPolicy::FullBleed).unwrap();
    let _ = resize_for_fit(&src, 16, 16, FitPolicy::contain(1.0).unwrap()).unwrap();
    assert_eq!(src, before);
}
