//! GPU shape renderers.

mod common;

pub mod arc;
