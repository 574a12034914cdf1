use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src_unscaled() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_half_alpha_on_opaque_mixes_colors() {
    let dst = [0, 0, 0, 255];
    let src = [200, 100, 0, 128];
    let out = over(dst, src);
    assert_eq!(out[3], 255);
    assert!((i32::from(out[0]) - 100).abs() <= 1);
    assert!((i32::from(out[1]) - 50).abs() <= 1);
    assert_eq!(out[2], 0);
}

#[test]
fn over_translucent_on_translucent_accumulates_alpha() {
    // 0.5 + 0.5 * 0.5 = 0.75
    let out = over([0, 0, 255, 128], [255, 0, 0, 128]);
    assert!((i32::from(out[3]) - 192).abs() <= 1);
    assert!(out[0] > out[2]);
}

#[test]
fn overlay_clips_negative_and_overflowing_offsets() {
    let mut dst = RasterImage::new(4, 4);
    let layer = RasterImage::from_pixel(3, 3, image::Rgba([9, 8, 7, 255]));

    overlay_at(&mut dst, &layer, -2, 2);
    let painted: Vec<(u32, u32)> = dst
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[3] != 0)
        .map(|(x, y, _)| (x, y))
        .collect();
    assert_eq!(painted, vec![(0, 2), (0, 3)]);

    overlay_at(&mut dst, &layer, 10, 10);
    overlay_at(&mut dst, &layer, -3, 0);
    assert_eq!(dst.pixels().filter(|p| p.0[3] != 0).count(), 2);
}

#[test]
fn overlay_respects_layer_transparency() {
    let mut dst = RasterImage::from_pixel(2, 1, image::Rgba([1, 2, 3, 255]));
    let mut layer = RasterImage::new(2, 1);
    layer.put_pixel(1, 0, image::Rgba([200, 200, 200, 255]));
    overlay_at(&mut dst, &layer, 0, 0);
    assert_eq!(dst.get_pixel(0, 0).0, [1, 2, 3, 255]);
    assert_eq!(dst.get_pixel(1, 0).0, [200, 200, 200, 255]);
}
