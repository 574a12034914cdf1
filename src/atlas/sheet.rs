use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::RasterImage;
use crate::foundation::error::{WalkError, WalkResult};

/// Cell size of a spritesheet grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TileSize {
    pub w: u32,
    pub h: u32,
}

/// Where one named sprite landed on the sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CellMeta {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// JSON sidecar written next to the sheet PNG.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SheetMeta {
    pub tile: TileSize,
    pub sprites: BTreeMap<String, CellMeta>,
}

/// Draws one procedurally generated tile with its top-left corner at `(x, y)`.
///
/// Painters must stay inside `tile`; pixels drawn outside the cell are not clipped for them.
pub trait TilePainter {
    fn paint(&self, sheet: &mut RasterImage, x: u32, y: u32, tile: TileSize);
}

impl<F> TilePainter for F
where
    F: Fn(&mut RasterImage, u32, u32, TileSize),
{
    fn paint(&self, sheet: &mut RasterImage, x: u32, y: u32, tile: TileSize) {
        self(sheet, x, y, tile)
    }
}

/// Row-major grid packer. Rows are added as cells are pushed.
#[derive(Debug)]
pub struct SpriteSheet {
    tile: TileSize,
    columns: u32,
    image: RasterImage,
    sprites: BTreeMap<String, CellMeta>,
    next: u32,
}

impl SpriteSheet {
    pub fn new(tile: TileSize, columns: u32) -> WalkResult<Self> {
        if tile.w == 0 || tile.h == 0 {
            return Err(WalkError::validation("sheet tile size must be > 0"));
        }
        if columns == 0 {
            return Err(WalkError::validation("sheet columns must be > 0"));
        }
        Ok(Self {
            tile,
            columns,
            image: RasterImage::new(tile.w * columns, 0),
            sprites: BTreeMap::new(),
            next: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Top-left pixel of grid cell `index`.
    pub fn cell_origin(&self, index: u32) -> (u32, u32) {
        (
            (index % self.columns) * self.tile.w,
            (index / self.columns) * self.tile.h,
        )
    }

    /// Copy `img` into the next free cell.
    pub fn push_image(&mut self, name: &str, img: &RasterImage) -> WalkResult<CellMeta> {
        if img.width() > self.tile.w || img.height() > self.tile.h {
            return Err(WalkError::validation(format!(
                "sprite '{name}' is {}x{}, larger than the {}x{} tile",
                img.width(),
                img.height(),
                self.tile.w,
                self.tile.h
            )));
        }
        let cell = self.claim(name)?;
        image::imageops::replace(&mut self.image, img, i64::from(cell.x), i64::from(cell.y));
        Ok(cell)
    }

    /// Let `painter` draw into the next free cell.
    pub fn push_painted(&mut self, name: &str, painter: &dyn TilePainter) -> WalkResult<CellMeta> {
        let cell = self.claim(name)?;
        painter.paint(&mut self.image, cell.x, cell.y, self.tile);
        Ok(cell)
    }

    fn claim(&mut self, name: &str) -> WalkResult<CellMeta> {
        if self.sprites.contains_key(name) {
            return Err(WalkError::validation(format!(
                "duplicate sheet entry '{name}'"
            )));
        }
        let (x, y) = self.cell_origin(self.next);
        self.grow_to(y + self.tile.h);
        let cell = CellMeta {
            x,
            y,
            w: self.tile.w,
            h: self.tile.h,
        };
        self.sprites.insert(name.to_string(), cell);
        self.next += 1;
        Ok(cell)
    }

    fn grow_to(&mut self, height: u32) {
        if height <= self.image.height() {
            return;
        }
        let mut grown = RasterImage::new(self.image.width(), height);
        image::imageops::replace(&mut grown, &self.image, 0, 0);
        self.image = grown;
    }

    pub fn finish(self) -> (RasterImage, SheetMeta) {
        (
            self.image,
            SheetMeta {
                tile: self.tile,
                sprites: self.sprites,
            },
        )
    }

    /// Write `{stem}.png` and `{stem}.json` into `dir`.
    pub fn write(self, dir: &Path, stem: &str) -> WalkResult<(PathBuf, PathBuf)> {
        let png_path = dir.join(format!("{stem}.png"));
        let json_path = dir.join(format!("{stem}.json"));
        let (pixels, meta) = self.finish();

        pixels
            .save_with_format(&png_path, image::ImageFormat::Png)
            .with_context(|| format!("write sheet png '{}'", png_path.display()))?;
        let json = serde_json::to_string_pretty(&meta).context("serialize sheet metadata")?;
        std::fs::write(&json_path, json)
            .with_context(|| format!("write sheet metadata '{}'", json_path.display()))?;
        Ok((png_path, json_path))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/sheet.rs"]
mod tests;
