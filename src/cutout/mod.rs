//! Turning a keyed sprite into a tight, scaled cutout.

pub mod alpha;
pub mod scale;
