/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
///
/// Premultiplied storage keeps the angular blend (`c1·t + c2·(1−t)`) and
/// source-over compositing linear in every channel.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

/// Amount subtracted from each straight channel by [`Color::darker`].
pub const DARKEN_STEP: f32 = 0.4;

impl Color {
    pub const TRANSPARENT: Color = Color::from_premul(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::from_premul(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::from_premul(1.0, 1.0, 1.0, 1.0);

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    /// Opaque gray of the given straight intensity.
    #[inline]
    pub fn gray(v: f32) -> Self {
        Self::from_straight(v, v, v, 1.0)
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Straight-alpha RGBA bytes, as expected by image encoders.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let (r, g, b, a) = self.clamped().to_straight();
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(r), q(g), q(b), q(a)]
    }

    /// The gradient's second endpoint: each straight channel reduced by
    /// [`DARKEN_STEP`] (floored at 0), alpha unchanged.
    #[inline]
    pub fn darker(self) -> Self {
        let (r, g, b, a) = self.to_straight();
        Self::from_straight(
            (r - DARKEN_STEP).max(0.0),
            (g - DARKEN_STEP).max(0.0),
            (b - DARKEN_STEP).max(0.0),
            a,
        )
    }

    /// Channel-wise `self·t + other·(1−t)`.
    #[inline]
    pub fn blend(self, other: Color, t: f32) -> Self {
        let u = 1.0 - t;
        Self {
            r: self.r * t + other.r * u,
            g: self.g * t + other.g * u,
            b: self.b * t + other.b * u,
            a: self.a * t + other.a * u,
        }
    }

    /// Scales every premultiplied channel (used for coverage and opacity).
    #[inline]
    pub fn scale(self, k: f32) -> Self {
        Self { r: self.r * k, g: self.g * k, b: self.b * k, a: self.a * k }
    }

    /// Premultiplied source-over: `self` drawn on top of `dst`.
    #[inline]
    pub fn over(self, dst: Color) -> Self {
        let inv = 1.0 - self.a;
        Self {
            r: self.r + dst.r * inv,
            g: self.g + dst.g * inv,
            b: self.b + dst.b * inv,
            a: self.a + dst.a * inv,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Clamps all channels to [0, 1] and enforces premultiplication.
    #[inline]
    pub fn clamped(self) -> Self {
        let a = self.a.clamp(0.0, 1.0);

        // Clamp premultiplied rgb so it cannot exceed alpha.
        let r = self.r.clamp(0.0, a);
        let g = self.g.clamp(0.0, a);
        let b = self.b.clamp(0.0, a);

        Self { r, g, b, a }
    }
}
