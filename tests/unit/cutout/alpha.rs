use super::*;
use crate::segment::background::NearWhite;
use crate::segment::soft_ramp::SoftRamp;

fn white_with_block(w: u32, h: u32, block: BoundingBox) -> RasterImage {
    RasterImage::from_fn(w, h, |x, y| {
        let inside = x >= block.left && x < block.right && y >= block.top && y < block.bottom;
        if inside {
            image::Rgba([200, 10, 10, 255])
        } else {
            image::Rgba([255, 255, 255, 255])
        }
    })
}

#[test]
fn apply_mask_only_touches_alpha_of_masked_pixels() {
    let block = BoundingBox {
        left: 2,
        top: 2,
        right: 4,
        bottom: 5,
    };
    let img = white_with_block(6, 7, block);
    let mask = segment_background(&img, NearWhite::default());
    let out = apply_mask(&img, &mask).unwrap();

    assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255, 0]);
    assert_eq!(out.get_pixel(3, 4).0, [200, 10, 10, 255]);
    let opaque = out.pixels().filter(|p| p.0[3] == 255).count();
    assert_eq!(opaque, 6);
}

#[test]
fn apply_mask_makes_translucent_foreground_opaque() {
    // White border, red body at half alpha, with an enclosed fully transparent red pixel.
    let img = RasterImage::from_fn(5, 5, |x, y| {
        if x == 0 || y == 0 || x == 4 || y == 4 {
            image::Rgba([255, 255, 255, 255])
        } else if (x, y) == (2, 2) {
            image::Rgba([255, 0, 0, 0])
        } else {
            image::Rgba([255, 0, 0, 128])
        }
    });
    let mask = segment_background(&img, NearWhite::default());
    let out = apply_mask(&img, &mask).unwrap();

    assert!(!mask.is_background(2, 2));
    assert_eq!(out.get_pixel(1, 1).0, [255, 0, 0, 255]);
    assert_eq!(out.get_pixel(2, 2).0, [255, 0, 0, 255]);
    assert_eq!(out.get_pixel(0, 0).0[3], 0);
}

#[test]
fn apply_mask_rejects_mismatched_sizes() {
    let img = RasterImage::new(4, 4);
    let mask = BackgroundMask::empty(3, 4);
    assert!(matches!(
        apply_mask(&img, &mask),
        Err(WalkError::Validation(_))
    ));
}

#[test]
fn content_bounds_reports_empty_foreground() {
    let img = RasterImage::new(5, 5);
    assert!(matches!(
        content_bounds(&img),
        Err(WalkError::EmptyForeground)
    ));
}

#[test]
fn crop_pads_and_clamps() {
    let block = BoundingBox {
        left: 1,
        top: 6,
        right: 5,
        bottom: 9,
    };
    let keyed = key_background(
        &white_with_block(10, 10, block),
        &BackgroundKey::default(),
    )
    .unwrap();
    let cropped = crop_to_content(&keyed, 2);
    // left clamps to 0, bottom clamps to 10
    assert_eq!(cropped.dimensions(), (7, 6));
    assert_eq!(cropped.get_pixel(1, 2).0, [200, 10, 10, 255]);
    assert_eq!(cropped.get_pixel(0, 0).0[3], 0);
}

#[test]
fn crop_is_idempotent() {
    let block = BoundingBox {
        left: 4,
        top: 3,
        right: 9,
        bottom: 11,
    };
    let keyed = key_background(
        &white_with_block(16, 14, block),
        &BackgroundKey::default(),
    )
    .unwrap();
    let once = crop_to_content(&keyed, 2);
    let twice = crop_to_content(&once, 2);
    assert_eq!(once.dimensions(), (9, 12));
    assert_eq!(once, twice);
    assert_eq!(content_bounds(&twice).unwrap().width(), block.width());
}

#[test]
fn crop_of_fully_transparent_image_is_identity() {
    let img = RasterImage::from_pixel(3, 2, image::Rgba([9, 9, 9, 0]));
    let out = crop_to_content(&img, 2);
    assert_eq!(out, img);
}

#[test]
fn soft_ramp_key_erases_interior_white() {
    let block = BoundingBox {
        left: 0,
        top: 0,
        right: 3,
        bottom: 3,
    };
    let mut img = white_with_block(3, 3, block);
    img.put_pixel(1, 1, image::Rgba([255, 255, 255, 255]));

    let flood = key_background(&img, &BackgroundKey::default()).unwrap();
    assert_eq!(flood.get_pixel(1, 1).0[3], 255);

    let ramp = key_background(&img, &BackgroundKey::SoftRamp(SoftRamp::default())).unwrap();
    assert_eq!(ramp.get_pixel(1, 1).0[3], 0);
}
