use crate::compose::blend::overlay_at;
use crate::compose::shadow::Shadow;
use crate::foundation::core::{Canvas, FrameOffset, RasterImage};
use crate::foundation::error::{WalkError, WalkResult};

/// Number of poses in a walk cycle. Frame 0 is the neutral pose.
pub const WALK_FRAMES: usize = 4;

/// How the sprite is laid onto each frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Compositing {
    /// The whole sprite moves as one block by the frame offset.
    Rigid,
    /// Upper body follows the frame offset; the two legs swing by extra per-frame dx.
    SplitBody(SplitBody),
}

impl Default for Compositing {
    fn default() -> Self {
        Self::SplitBody(SplitBody::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SplitBody {
    /// Fraction of the sprite height where the legs begin.
    pub split_fraction: f32,
    pub left_leg_dx: [i32; WALK_FRAMES],
    pub right_leg_dx: [i32; WALK_FRAMES],
}

impl Default for SplitBody {
    fn default() -> Self {
        Self {
            split_fraction: 0.62,
            left_leg_dx: [-1, 0, 1, 0],
            right_leg_dx: [1, 0, -1, 0],
        }
    }
}

/// Body offsets for each pose plus the compositing mode.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WalkCycle {
    pub frames: [FrameOffset; WALK_FRAMES],
    pub compositing: Compositing,
}

impl Default for WalkCycle {
    fn default() -> Self {
        Self {
            frames: [
                FrameOffset::new(0, 0),
                FrameOffset::new(0, -1),
                FrameOffset::new(0, 0),
                FrameOffset::new(0, -1),
            ],
            compositing: Compositing::default(),
        }
    }
}

impl WalkCycle {
    /// A rigid cycle over the given offsets.
    pub fn rigid(frames: [FrameOffset; WALK_FRAMES]) -> Self {
        Self {
            frames,
            compositing: Compositing::Rigid,
        }
    }

    pub fn validate(&self) -> WalkResult<()> {
        if let Compositing::SplitBody(split) = self.compositing {
            let f = split.split_fraction;
            if !f.is_finite() || !(0.0..=1.0).contains(&f) {
                return Err(WalkError::validation(format!(
                    "split_fraction must be within [0, 1], got {f}"
                )));
            }
        }
        Ok(())
    }

    /// Largest horizontal displacement any sprite part gets in any frame.
    pub fn max_horizontal_shift(&self) -> u64 {
        self.frames
            .iter()
            .enumerate()
            .map(|(i, off)| {
                let dx = i64::from(off.dx);
                match self.compositing {
                    Compositing::Rigid => dx.unsigned_abs(),
                    Compositing::SplitBody(split) => dx
                        .unsigned_abs()
                        .max((dx + i64::from(split.left_leg_dx[i])).unsigned_abs())
                        .max((dx + i64::from(split.right_leg_dx[i])).unsigned_abs()),
                }
            })
            .max()
            .unwrap_or(0)
    }
}

/// Top-left position of the unshifted sprite: horizontally centered, feet on the bottom row.
pub fn anchor(canvas: Canvas, sprite_width: u32, sprite_height: u32) -> (i64, i64) {
    let base_x = (i64::from(canvas.width) - i64::from(sprite_width)).div_euclid(2);
    let base_y = i64::from(canvas.height) - i64::from(sprite_height);
    (base_x, base_y)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PartKind {
    Body,
    LeftLeg,
    RightLeg,
}

struct Part {
    image: RasterImage,
    x: i64,
    y: i64,
    kind: PartKind,
}

fn partition(sprite: &RasterImage, compositing: Compositing) -> Vec<Part> {
    let (sw, sh) = sprite.dimensions();
    let Compositing::SplitBody(split) = compositing else {
        return vec![Part {
            image: sprite.clone(),
            x: 0,
            y: 0,
            kind: PartKind::Body,
        }];
    };

    let split_y = ((f64::from(sh) * f64::from(split.split_fraction)).floor() as u32).min(sh);
    let half = sw / 2;
    let legs_h = sh - split_y;
    let cut = |x, y, w, h| image::imageops::crop_imm(sprite, x, y, w, h).to_image();

    vec![
        Part {
            image: cut(0, 0, sw, split_y),
            x: 0,
            y: 0,
            kind: PartKind::Body,
        },
        Part {
            image: cut(0, split_y, half, legs_h),
            x: 0,
            y: i64::from(split_y),
            kind: PartKind::LeftLeg,
        },
        Part {
            image: cut(half, split_y, sw - half, legs_h),
            x: i64::from(half),
            y: i64::from(split_y),
            kind: PartKind::RightLeg,
        },
    ]
}

/// Composite one canvas-sized frame per pose of `cycle`.
///
/// Each frame starts transparent, gets the shadow shifted by the pose's dx, then the sprite
/// parts on top at the anchor plus their offsets.
pub fn compose_walk_frames(
    sprite: &RasterImage,
    canvas: Canvas,
    cycle: &WalkCycle,
    shadow: &Shadow,
) -> WalkResult<Vec<RasterImage>> {
    let (sw, sh) = sprite.dimensions();
    if sw == 0 || sh == 0 {
        return Err(WalkError::degenerate(format!(
            "cannot composite a {sw}x{sh} sprite"
        )));
    }
    cycle.validate()?;

    let (base_x, base_y) = anchor(canvas, sw, sh);
    let parts = partition(sprite, cycle.compositing);
    tracing::debug!(base_x, base_y, parts = parts.len(), "compositing walk frames");

    let mut frames = Vec::with_capacity(WALK_FRAMES);
    for (i, off) in cycle.frames.iter().enumerate() {
        let mut frame = canvas.blank();
        shadow.draw(&mut frame, off.dx);

        for part in &parts {
            let swing = match (cycle.compositing, part.kind) {
                (Compositing::SplitBody(split), PartKind::LeftLeg) => split.left_leg_dx[i],
                (Compositing::SplitBody(split), PartKind::RightLeg) => split.right_leg_dx[i],
                _ => 0,
            };
            let x = base_x + part.x + i64::from(off.dx) + i64::from(swing);
            let y = base_y + part.y + i64::from(off.dy);
            overlay_at(&mut frame, &part.image, x, y);
        }
        frames.push(frame);
    }
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/walk.rs"]
mod tests;
