//! Coordinate and geometry types shared by the host seam and the widgets.
//!
//! Canonical space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left of the viewport
//! - +X right, +Y down

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
