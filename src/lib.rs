//! walkcycle turns hand-drawn, white-backed character sprites into canvas-aligned walk-cycle
//! frames with clean alpha.
//!
//! # Pipeline overview
//!
//! 1. **Key**: border-seeded flood fill marks the white backdrop as background
//!    ([`segment_background`]), or the per-pixel [`SoftRamp`] key is used instead.
//! 2. **Cut out**: masked pixels become transparent and the sprite is cropped to its visible
//!    content plus padding ([`crop_to_content`]).
//! 3. **Scale**: aspect-preserving resize to the target height ([`scale_to_height`]).
//! 4. **Compose**: one canvas-sized frame per pose, shadow first, sprite parts on top
//!    ([`compose_walk_frames`]).
//! 5. **Persist**: [`run_batch`] writes `{name}_walk_{i}.png` per character, isolating
//!    failures per character.
//!
//! Every stage borrows its input and returns a new owned [`RasterImage`]; no stage mutates
//! another stage's output.
#![forbid(unsafe_code)]

mod atlas;
mod compose;
mod config;
mod cutout;
mod foundation;
mod pipeline;
mod segment;

pub use atlas::sheet::{CellMeta, SheetMeta, SpriteSheet, TileSize, TilePainter};
pub use compose::blend::{StraightRgba8, over, overlay_at};
pub use compose::shadow::Shadow;
pub use compose::walk::{Compositing, SplitBody, WALK_FRAMES, WalkCycle, anchor, compose_walk_frames};
pub use config::{AtlasConfig, PipelineConfig, SpriteSource};
pub use cutout::alpha::{apply_mask, content_bounds, crop_to_content, key_background};
pub use cutout::scale::{scale_to_height, scaled_width};
pub use foundation::core::{BoundingBox, Canvas, FrameOffset, RasterImage, Rgba8};
pub use foundation::error::{WalkError, WalkResult};
pub use pipeline::{
    BatchReport, CharacterIssue, CharacterOutput, frame_stem, load_source, prepare_sprite,
    render_character, run_batch, write_frames,
};
pub use segment::BackgroundKey;
pub use segment::background::{BackgroundMask, NearWhite, segment_background};
pub use segment::soft_ramp::{SoftRamp, soft_ramp_alpha};
