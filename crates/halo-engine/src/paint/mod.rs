//! Paint model shared between the ring widgets and renderers.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - paint sources (solid, two-color angular sweep)
//!
//! Geometry types remain in `coords` and `geom`.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{blend_ratio, AngularGradient};

/// Paint source for stroking geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    AngularGradient(AngularGradient),
}

impl Paint {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }

    /// Color of this paint at logical position `pos`.
    #[inline]
    pub fn color_at(&self, pos: crate::coords::Vec2) -> Color {
        match self {
            Paint::Solid(c) => *c,
            Paint::AngularGradient(g) => g.color_at(pos),
        }
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        match self {
            Paint::Solid(c) => c.a >= 1.0,
            Paint::AngularGradient(g) => g.colors.0.a >= 1.0 && g.colors.1.a >= 1.0,
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

impl From<AngularGradient> for Paint {
    fn from(g: AngularGradient) -> Self {
        Paint::AngularGradient(g)
    }
}
