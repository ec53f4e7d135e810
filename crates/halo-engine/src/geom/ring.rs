use core::f32::consts::{FRAC_PI_2, TAU};

use crate::coords::Rect;

use super::{ArcPath, LineCap};

/// Angular width of the tip capsule, in radians.
pub const TIP_SPAN: f32 = 0.01;

/// Extent of the tip shadow mask: the first quarter turn of the ring.
pub const SHADOW_MASK_SWEEP: f32 = FRAC_PI_2;

/// Centre-line radius of a ring stroked with `stroke_width` inside `bounds`.
///
/// May be zero or negative when the stroke is as wide as the bounds; every
/// path builder below turns that into an empty path.
#[inline]
pub fn ring_radius(bounds: Rect, stroke_width: f32) -> f32 {
    (bounds.min_side() - stroke_width) * 0.5
}

/// Full background circle concentric with `bounds`.
pub fn track_path(bounds: Rect, stroke_width: f32) -> ArcPath {
    ArcPath::circle(bounds.center(), ring_radius(bounds, stroke_width), stroke_width)
}

/// Progress arc from 3 o'clock, clockwise over `progress · 2π`.
///
/// `progress <= 0` (and NaN) is empty, `progress >= 1` is the full circle.
pub fn arc_path(bounds: Rect, stroke_width: f32, progress: f32) -> ArcPath {
    if !(progress > 0.0) {
        return ArcPath::EMPTY;
    }
    ArcPath::new(
        bounds.center(),
        ring_radius(bounds, stroke_width),
        0.0,
        progress.min(1.0) * TAU,
        stroke_width,
        LineCap::Butt,
    )
}

/// Rounded capsule ending at angle 0: the decorative start cap of the arc.
pub fn tip_path(bounds: Rect, stroke_width: f32) -> ArcPath {
    ArcPath::new(
        bounds.center(),
        ring_radius(bounds, stroke_width),
        -TIP_SPAN,
        TIP_SPAN,
        stroke_width,
        LineCap::Round,
    )
}

/// Region the tip shadow may cover (`0 ..= π/2`).
pub fn shadow_mask_path(bounds: Rect, stroke_width: f32) -> ArcPath {
    ArcPath::new(
        bounds.center(),
        ring_radius(bounds, stroke_width),
        0.0,
        SHADOW_MASK_SWEEP,
        stroke_width,
        LineCap::Butt,
    )
}

/// Every path one ring needs for a frame.
///
/// Derived data: rebuild with [`RingGeometry::new`] whenever bounds, stroke
/// width or progress change.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct RingGeometry {
    pub track: ArcPath,
    pub arc: ArcPath,
    pub tip: ArcPath,
    pub shadow_mask: ArcPath,
}

impl RingGeometry {
    pub fn new(bounds: Rect, stroke_width: f32, progress: f32) -> Self {
        Self {
            track: track_path(bounds, stroke_width),
            arc: arc_path(bounds, stroke_width, progress),
            tip: tip_path(bounds, stroke_width),
            shadow_mask: shadow_mask_path(bounds, stroke_width),
        }
    }

    /// Radius shared by all four paths (0 when the ring is degenerate).
    #[inline]
    pub fn radius(&self) -> f32 {
        self.track.radius
    }
}
