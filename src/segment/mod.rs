//! Background classification for white-backed sprite sheets.

pub mod background;
pub mod soft_ramp;

use background::NearWhite;
use soft_ramp::SoftRamp;

/// Which background key to run on a source sprite.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum BackgroundKey {
    /// Border-seeded flood fill over near-white, near-neutral pixels.
    FloodFill(NearWhite),
    /// Per-pixel soft alpha ramp with no connectivity test.
    SoftRamp(SoftRamp),
}

impl Default for BackgroundKey {
    fn default() -> Self {
        Self::FloodFill(NearWhite::default())
    }
}
