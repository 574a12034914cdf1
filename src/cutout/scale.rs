use image::imageops::FilterType;

use crate::foundation::core::RasterImage;
use crate::foundation::error::{WalkError, WalkResult};

/// Width that keeps `width:height` when the height becomes `target_height`.
///
/// Rounded to the nearest pixel, never below 1.
pub fn scaled_width(width: u32, height: u32, target_height: u32) -> WalkResult<u32> {
    if height == 0 {
        return Err(WalkError::degenerate("cannot scale an image with zero height"));
    }
    let w = (f64::from(width) * f64::from(target_height) / f64::from(height)).round();
    Ok((w as u32).max(1))
}

/// Resize to exactly `target_height` rows, preserving aspect ratio.
///
/// Resampling runs on premultiplied pixels so the hidden color of transparent pixels never
/// bleeds into visible edges.
pub fn scale_to_height(img: &RasterImage, target_height: u32) -> WalkResult<RasterImage> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(WalkError::degenerate(format!(
            "cannot scale a {w}x{h} image"
        )));
    }
    if target_height == 0 {
        return Err(WalkError::validation("target height must be > 0"));
    }
    let tw = scaled_width(w, h, target_height)?;
    tracing::debug!(from_w = w, from_h = h, to_w = tw, to_h = target_height, "scaling sprite");

    let mut premul = img.clone();
    premultiply_in_place(&mut premul);
    let mut out = image::imageops::resize(&premul, tw, target_height, FilterType::Lanczos3);
    unpremultiply_in_place(&mut out);
    Ok(out)
}

fn premultiply_in_place(img: &mut RasterImage) {
    for px in img.pixels_mut() {
        let a = u16::from(px.0[3]);
        if a == 0 {
            px.0 = [0, 0, 0, 0];
            continue;
        }
        for c in &mut px.0[..3] {
            *c = ((u16::from(*c) * a + 127) / 255) as u8;
        }
    }
}

fn unpremultiply_in_place(img: &mut RasterImage) {
    for px in img.pixels_mut() {
        let a = u32::from(px.0[3]);
        if a == 0 {
            px.0 = [0, 0, 0, 0];
            continue;
        }
        for c in &mut px.0[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cutout/scale.rs"]
mod tests;
