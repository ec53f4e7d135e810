//! Stroke geometry for progress rings.
//!
//! Paths are circular arcs described analytically (centre, radius, angles,
//! stroke width). Renderers evaluate them through a signed distance instead
//! of tessellating, which keeps the CPU and GPU backends in agreement.
//!
//! Angles are radians measured from the 3 o'clock direction; with +Y down,
//! a positive sweep runs clockwise on screen.

mod arc;
mod ring;

pub use arc::{ArcPath, LineCap};
pub use ring::{
    arc_path, ring_radius, shadow_mask_path, tip_path, track_path, RingGeometry,
    SHADOW_MASK_SWEEP, TIP_SPAN,
};
