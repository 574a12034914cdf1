//! Grid spritesheets with JSON metadata.

pub mod sheet;
