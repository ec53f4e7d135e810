//! Coordinate and geometry types shared by the ring geometry, renderers and UI.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down, so positive angles sweep clockwise on screen
//!
//! The GPU renderer converts to NDC in its shader using a viewport uniform.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
