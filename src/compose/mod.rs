//! Frame compositing: blend math, drop shadow and walk-cycle layout.

pub mod blend;
pub mod shadow;
pub mod walk;
