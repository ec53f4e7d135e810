//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to a runtime.
//! Intended usage:
//! - one `FrameClock` per render loop
//! - call `tick()` once per frame and feed `FrameTime::dt` to animations

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
