use super::*;

const DARK: image::Rgba<u8> = image::Rgba([20, 20, 20, 255]);
const WHITE: image::Rgba<u8> = image::Rgba([250, 250, 250, 255]);

fn framed(w: u32, h: u32, hole: (u32, u32, u32, u32)) -> RgbaImage {
    let (l, t, r, b) = hole;
    RgbaImage::from_fn(w, h, |x, y| {
        if (l..=r).contains(&x) && (t..=b).contains(&y) {
            WHITE
        } else {
            DARK
        }
    })
}

#[test]
fn finds_centered_rectangular_hole() {
    let img = framed(20, 30, (3, 5, 16, 24));
    let b = detect_opaque_bounds(&img, DEFAULT_WHITE_THRESHOLD);
    assert_eq!(
        b,
        OpaqueBounds {
            left: 3,
            right: 16,
            top: 5,
            bottom: 24
        }
    );
    assert_eq!(b.width(), 13);
    assert_eq!(b.height(), 19);
}

#[test]
fn no_white_falls_back_to_image_edges() {
    let img = RgbaImage::from_pixel(8, 6, DARK);
    let b = detect_opaque_bounds(&img, DEFAULT_WHITE_THRESHOLD);
    assert_eq!(
        b,
        OpaqueBounds {
            left: 0,
            right: 7,
            top: 0,
            bottom: 5
        }
    );
}

#[test]
fn threshold_is_strict() {
    let img = RgbaImage::from_fn(10, 10, |x, y| {
        if (2..=7).contains(&x) && (2..=7).contains(&y) {
            image::Rgba([240, 240, 240, 255])
        } else {
            DARK
        }
    });

    let b = detect_opaque_bounds(&img, 240);
    assert_eq!((b.left, b.right, b.top, b.bottom), (0, 9, 0, 9));

    let b = detect_opaque_bounds(&img, 239);
    assert_eq!((b.left, b.right, b.top, b.bottom), (2, 7, 2, 7));
}

#[test]
fn off_center_hole_is_missed_on_the_other_axis() {
    // Hole sits in the top-left quadrant: the horizontal centerline (row 5) misses it, the
    // vertical centerline (column 5) does not.
    let img = framed(10, 10, (1, 1, 5, 3));
    let b = detect_opaque_bounds(&img, DEFAULT_WHITE_THRESHOLD);
    assert_eq!((b.left, b.right), (0, 9));
    assert_eq!((b.top, b.bottom), (1, 3));
}

#[test]
fn alpha_is_ignored() {
    let img = RgbaImage::from_pixel(3, 3, image::Rgba([255, 255, 255, 0]));
    let b = detect_opaque_bounds(&img, DEFAULT_WHITE_THRESHOLD);
    assert_eq!((b.left, b.right, b.top, b.bottom), (0, 2, 0, 2));
}
