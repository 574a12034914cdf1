use crate::foundation::error::{WalkError, WalkResult};

/// Owned RGBA8 raster with straight (non-premultiplied) alpha.
///
/// Every stage consumes a borrowed raster and returns a fresh owned one.
pub type RasterImage = image::RgbaImage;

/// Output frame size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> WalkResult<Self> {
        if width == 0 || height == 0 {
            return Err(WalkError::validation("canvas width and height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// A fully transparent raster of canvas size.
    pub fn blank(self) -> RasterImage {
        RasterImage::new(self.width, self.height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
        }
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        c.to_array()
    }
}

impl From<Rgba8> for image::Rgba<u8> {
    fn from(c: Rgba8) -> Self {
        image::Rgba(c.to_array())
    }
}

/// Per-frame pixel nudge applied to the sprite body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FrameOffset {
    pub dx: i32,
    pub dy: i32, // negative bobs upward
}

impl FrameOffset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl From<(i32, i32)> for FrameOffset {
    fn from((dx, dy): (i32, i32)) -> Self {
        Self { dx, dy }
    }
}

/// Pixel rectangle; `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn width(self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Grow by `pad` on every side, clamped to a `width` x `height` image.
    pub fn expand_clamped(self, pad: u32, width: u32, height: u32) -> Self {
        Self {
            left: self.left.saturating_sub(pad),
            top: self.top.saturating_sub(pad),
            right: self.right.saturating_add(pad).min(width),
            bottom: self.bottom.saturating_add(pad).min(height),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
