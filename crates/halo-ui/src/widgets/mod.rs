//! Ring widgets.

pub mod ring;
pub mod three_ring;
