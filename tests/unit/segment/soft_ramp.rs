use super::*;

#[test]
fn ramp_bands() {
    let ramp = SoftRamp::default();
    assert_eq!(ramp.alpha_for(255, 255, 255), 0);
    assert_eq!(ramp.alpha_for(251, 252, 253), 0);
    assert_eq!(ramp.alpha_for(100, 200, 255), 255);
    assert_eq!(ramp.alpha_for(238, 255, 255), 255);
    // mean 245 -> (250 - 245) * 28 = 140
    assert_eq!(ramp.alpha_for(245, 245, 245), 140);
    // mean 240 -> 280, clamped
    assert_eq!(ramp.alpha_for(239, 240, 241), 255);
    // one channel at the clear threshold keeps the pixel in the ramp band
    assert_eq!(ramp.alpha_for(250, 255, 255), 0);
}

#[test]
fn ramp_keys_interior_white_too() {
    let img = RasterImage::from_fn(3, 3, |x, y| {
        if (x, y) == (1, 1) {
            image::Rgba([255, 255, 255, 255])
        } else {
            image::Rgba([10, 10, 10, 255])
        }
    });
    let out = soft_ramp_alpha(&img, SoftRamp::default());
    assert_eq!(out.get_pixel(1, 1).0, [255, 255, 255, 0]);
    assert_eq!(out.get_pixel(0, 0).0, [10, 10, 10, 255]);
}

#[test]
fn ramp_never_raises_source_alpha() {
    let img = RasterImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 40]));
    let out = soft_ramp_alpha(&img, SoftRamp::default());
    assert_eq!(out.get_pixel(0, 0).0[3], 40);
}
