//! GPU device management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - owning an offscreen color target for headless rendering
//! - handing renderers a `RenderCtx`/`RenderTarget` pair per frame

mod headless;

pub use headless::{GpuInit, HeadlessGpu};
