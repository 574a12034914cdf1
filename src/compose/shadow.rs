use kurbo::{Ellipse, Point, Rect, Shape};

use crate::compose::blend::over;
use crate::foundation::core::{RasterImage, Rgba8};

/// Soft ground shadow drawn under the sprite's feet.
///
/// The ellipse is inscribed in the inclusive pixel box `left..=right` x `top..=bottom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Shadow {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub color: Rgba8,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            left: 10,
            top: 27,
            right: 22,
            bottom: 31,
            color: Rgba8::new(32, 44, 32, 110),
        }
    }
}

impl Shadow {
    // Pixel-space box edges widened to i64 so any i32 shift stays exact.
    fn edges(&self, dx: i32) -> (i64, i64, i64, i64) {
        let dx = i64::from(dx);
        (
            i64::from(self.left) + dx,
            i64::from(self.top),
            i64::from(self.right) + dx,
            i64::from(self.bottom),
        )
    }

    /// Blend the shadow onto `canvas`, shifted horizontally by `dx`.
    ///
    /// A pixel is filled when its center lies inside the ellipse.
    pub fn draw(&self, canvas: &mut RasterImage, dx: i32) {
        if self.right < self.left || self.bottom < self.top || self.color.a == 0 {
            return;
        }
        let (left, top, right, bottom) = self.edges(dx);
        let shape = Ellipse::from_rect(Rect::new(
            left as f64,
            top as f64,
            (right + 1) as f64,
            (bottom + 1) as f64,
        ));
        let color = self.color.to_array();

        let (w, h) = (i64::from(canvas.width()), i64::from(canvas.height()));
        let x0 = left.max(0);
        let x1 = right.min(w - 1);
        let y0 = top.max(0);
        let y1 = bottom.min(h - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if shape.contains(center) {
                    let px = canvas.get_pixel_mut(x as u32, y as u32);
                    px.0 = over(px.0, color);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/shadow.rs"]
mod tests;
