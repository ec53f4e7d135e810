use core::f32::consts::TAU;

use crate::coords::{Rect, Vec2};

use super::Color;

/// Blend ratio of the angular sweep at `pos` on a surface of `size`.
///
/// `pos` is surface-local (top-left origin). With `x = 1 − 2·pos.x/w` and
/// `y = 1 − 2·pos.y/h` the ratio is `atan2(y, x)/(2π) + 0.5`, so it lies in
/// `[0, 1]`. The centre point and degenerate surfaces have no angle and
/// report `0.5`.
#[inline]
pub fn blend_ratio(pos: Vec2, size: Vec2) -> f32 {
    if !(size.x > 0.0 && size.y > 0.0) || !size.is_finite() || !pos.is_finite() {
        return 0.5;
    }
    let x = 1.0 - 2.0 * pos.x / size.x;
    let y = 1.0 - 2.0 * pos.y / size.y;
    if x == 0.0 && y == 0.0 {
        return 0.5;
    }
    y.atan2(x) / TAU + 0.5
}

/// Two-color angular sweep evaluated over a fixed surface.
///
/// The surface is the full bounds of the ring, not the visible arc: the
/// color at a given angle does not depend on how much of the sweep is
/// currently revealed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularGradient {
    /// Logical-pixel rectangle the shader is evaluated over.
    pub surface: Rect,
    /// `(c1, c2)`: output is `c1·t + c2·(1−t)`.
    pub colors: (Color, Color),
}

impl AngularGradient {
    #[inline]
    pub const fn new(surface: Rect, colors: (Color, Color)) -> Self {
        Self { surface, colors }
    }

    /// Shader output at logical position `pos`.
    #[inline]
    pub fn color_at(&self, pos: Vec2) -> Color {
        let t = blend_ratio(pos - self.surface.origin, self.surface.size);
        self.colors.0.blend(self.colors.1, t)
    }

    pub fn is_valid(&self) -> bool {
        self.surface.is_finite()
            && !self.surface.is_empty()
            && self.colors.0.is_finite()
            && self.colors.1.is_finite()
    }
}
