use crate::foundation::core::RasterImage;

/// Per-pixel white key with a linear alpha ramp for anti-aliased edges.
///
/// Unlike the border-seeded fill this has no notion of connectivity: any sufficiently
/// white pixel is keyed out, wherever it sits.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SoftRamp {
    /// Channels must all exceed this for the pixel to be partially keyed.
    pub opaque_below: u8,
    /// Channels all above this are keyed out completely.
    pub clear_above: u8,
    /// Alpha gained per unit of mean brightness below `clear_above`.
    pub gain: f32,
}

impl Default for SoftRamp {
    fn default() -> Self {
        Self {
            opaque_below: 238,
            clear_above: 250,
            gain: 28.0,
        }
    }
}

impl SoftRamp {
    /// Alpha for a straight RGB color; the source alpha is not consulted.
    pub fn alpha_for(self, r: u8, g: u8, b: u8) -> u8 {
        let all_above = |t: u8| r > t && g > t && b > t;
        if all_above(self.clear_above) {
            return 0;
        }
        if !all_above(self.opaque_below) {
            return 255;
        }
        let mean = (f32::from(r) + f32::from(g) + f32::from(b)) / 3.0;
        let a = (f32::from(self.clear_above) - mean) * self.gain;
        // Truncate toward zero before clamping.
        (a.trunc() as i32).clamp(0, 255) as u8
    }
}

/// Apply [`SoftRamp`] to every pixel; colors are kept, alpha is the minimum of the key and
/// the source alpha.
pub fn soft_ramp_alpha(img: &RasterImage, ramp: SoftRamp) -> RasterImage {
    let mut out = img.clone();
    for px in out.pixels_mut() {
        let [r, g, b, a] = px.0;
        px.0[3] = ramp.alpha_for(r, g, b).min(a);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/segment/soft_ramp.rs"]
mod tests;
