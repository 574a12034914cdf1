use crate::foundation::core::{BoundingBox, RasterImage};
use crate::foundation::error::{WalkError, WalkResult};
use crate::segment::BackgroundKey;
use crate::segment::background::{BackgroundMask, segment_background};
use crate::segment::soft_ramp::soft_ramp_alpha;

/// Masked pixels become fully transparent and every other pixel fully opaque. Colors are kept.
pub fn apply_mask(img: &RasterImage, mask: &BackgroundMask) -> WalkResult<RasterImage> {
    if img.dimensions() != (mask.width(), mask.height()) {
        return Err(WalkError::validation(format!(
            "mask is {}x{} but image is {}x{}",
            mask.width(),
            mask.height(),
            img.width(),
            img.height()
        )));
    }
    let mut out = img.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        px.0[3] = if mask.is_background(x, y) { 0 } else { 255 };
    }
    Ok(out)
}

/// Run the configured background key and return the keyed raster.
pub fn key_background(img: &RasterImage, key: &BackgroundKey) -> WalkResult<RasterImage> {
    match key {
        BackgroundKey::FloodFill(predicate) => {
            let mask = segment_background(img, *predicate);
            apply_mask(img, &mask)
        }
        BackgroundKey::SoftRamp(ramp) => Ok(soft_ramp_alpha(img, *ramp)),
    }
}

/// Tight box around every pixel with non-zero alpha.
pub fn content_bounds(img: &RasterImage) -> WalkResult<BoundingBox> {
    let mut bounds: Option<BoundingBox> = None;
    for (x, y, px) in img.enumerate_pixels() {
        if px.0[3] == 0 {
            continue;
        }
        let b = bounds.get_or_insert(BoundingBox {
            left: x,
            top: y,
            right: x + 1,
            bottom: y + 1,
        });
        b.left = b.left.min(x);
        b.top = b.top.min(y);
        b.right = b.right.max(x + 1);
        b.bottom = b.bottom.max(y + 1);
    }
    bounds.ok_or(WalkError::EmptyForeground)
}

/// Crop to visible content plus `pad` pixels of margin on each side.
///
/// An image with no visible pixels is returned uncropped.
pub fn crop_to_content(img: &RasterImage, pad: u32) -> RasterImage {
    let bounds = match content_bounds(img) {
        Ok(b) => b,
        Err(_) => {
            tracing::debug!(
                width = img.width(),
                height = img.height(),
                "no visible pixels, skipping crop"
            );
            return img.clone();
        }
    };
    let b = bounds.expand_clamped(pad, img.width(), img.height());
    tracing::debug!(
        left = b.left,
        top = b.top,
        right = b.right,
        bottom = b.bottom,
        "cropping to content"
    );
    image::imageops::crop_imm(img, b.left, b.top, b.width(), b.height()).to_image()
}

#[cfg(test)]
#[path = "../../tests/unit/cutout/alpha.rs"]
mod tests;
