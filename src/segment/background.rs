use std::collections::VecDeque;

use crate::foundation::core::RasterImage;

/// Near-white, near-neutral pixel test used to seed and grow the background region.
///
/// A pixel passes when every color channel is strictly above `threshold` and the spread
/// between its largest and smallest channel is at most `tolerance`. Alpha is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NearWhite {
    pub threshold: u8,
    pub tolerance: u8,
}

impl Default for NearWhite {
    fn default() -> Self {
        Self {
            threshold: 240,
            tolerance: 16,
        }
    }
}

impl NearWhite {
    pub fn matches(self, px: [u8; 4]) -> bool {
        let [r, g, b, _] = px;
        let lo = r.min(g).min(b);
        let hi = r.max(g).max(b);
        lo > self.threshold && hi - lo <= self.tolerance
    }
}

/// Per-pixel background flags, row-major, same size as the source raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BackgroundMask {
    /// A mask with no background pixels.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `false` for coordinates outside the mask.
    pub fn is_background(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[self.index(x, y)]
    }

    pub fn background_count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn mark(&mut self, x: u32, y: u32) -> bool {
        let idx = self.index(x, y);
        if self.bits[idx] {
            return false;
        }
        self.bits[idx] = true;
        true
    }
}

/// Classify the background as the near-white region connected to the image border.
///
/// Breadth-first fill seeded from every border pixel that passes `predicate`, growing through
/// the four axis-aligned neighbors. Near-white pixels that cannot be reached from the border
/// (eyes, highlights, enclosed gaps) stay foreground.
pub fn segment_background(img: &RasterImage, predicate: NearWhite) -> BackgroundMask {
    let (w, h) = img.dimensions();
    let mut mask = BackgroundMask::empty(w, h);
    if w == 0 || h == 0 {
        return mask;
    }

    let passes = |x: u32, y: u32| predicate.matches(img.get_pixel(x, y).0);
    let mut queue = VecDeque::<(u32, u32)>::new();

    let mut seed = |x: u32, y: u32, mask: &mut BackgroundMask| {
        if passes(x, y) && mask.mark(x, y) {
            queue.push_back((x, y));
        }
    };
    for x in 0..w {
        seed(x, 0, &mut mask);
        seed(x, h - 1, &mut mask);
    }
    for y in 0..h {
        seed(0, y, &mut mask);
        seed(w - 1, y, &mut mask);
    }

    while let Some((x, y)) = queue.pop_front() {
        let neighbors = [
            x.checked_sub(1).map(|nx| (nx, y)),
            (x + 1 < w).then_some((x + 1, y)),
            y.checked_sub(1).map(|ny| (x, ny)),
            (y + 1 < h).then_some((x, y + 1)),
        ];
        for (nx, ny) in neighbors.into_iter().flatten() {
            if !mask.is_background(nx, ny) && passes(nx, ny) && mask.mark(nx, ny) {
                queue.push_back((nx, ny));
            }
        }
    }

    tracing::debug!(
        width = w,
        height = h,
        background = mask.background_count(),
        "segmented background"
    );
    mask
}

#[cfg(test)]
#[path = "../../tests/unit/segment/background.rs"]
mod tests;
