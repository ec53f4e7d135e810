//! Halo engine crate.
//!
//! Geometry, paint and rendering for concentric progress rings:
//! - `coords`, `paint`, `geom`: pure value types and path builders
//! - `scene`: the per-frame draw stream
//! - `render`: CPU rasterizer and wgpu renderer for that stream
//! - `device`, `time`, `logging`: runtime plumbing for hosts

pub mod coords;
pub mod device;
pub mod geom;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod time;
