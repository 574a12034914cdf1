use crate::foundation::core::RasterImage;

pub type StraightRgba8 = [u8; 4];

/// Straight-alpha "over": `src` layered on top of `dst`.
pub fn over(dst: StraightRgba8, src: StraightRgba8) -> StraightRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 || dst[3] == 0 {
        return src;
    }

    // Weight of the destination after the source covers it.
    let dw = mul_div255(u16::from(dst[3]), 255 - u16::from(sa));
    let oa = u32::from(sa) + u32::from(dw);

    let mut out = [0u8; 4];
    out[3] = oa.min(255) as u8;
    for i in 0..3 {
        let c = u32::from(src[i]) * u32::from(sa) + u32::from(dst[i]) * u32::from(dw);
        out[i] = ((c + oa / 2) / oa).min(255) as u8;
    }
    out
}

/// Composite `layer` onto `dst` with its top-left corner at `(x, y)`.
///
/// The offset may be negative or push the layer past the far edges; anything outside
/// `dst` is clipped.
pub fn overlay_at(dst: &mut RasterImage, layer: &RasterImage, x: i64, y: i64) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (lw, lh) = (i64::from(layer.width()), i64::from(layer.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + lw).min(dw);
    let y1 = (y + lh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for dy in y0..y1 {
        for dx in x0..x1 {
            let src = layer.get_pixel((dx - x) as u32, (dy - y) as u32).0;
            let d = dst.get_pixel_mut(dx as u32, dy as u32);
            d.0 = over(d.0, src);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/compose/blend.rs"]
mod tests;
