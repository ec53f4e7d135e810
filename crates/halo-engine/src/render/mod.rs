//! Rendering backends for ring draw streams.
//!
//! - `raster`: CPU rasterizer producing premultiplied pixels (headless
//!   snapshots, tests)
//! - `shapes`: wgpu renderers drawing into a host-owned target
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - The GPU vertex shader converts to NDC using a viewport uniform.

mod ctx;
pub mod raster;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use raster::Canvas;
