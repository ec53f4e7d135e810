use core::f32::consts::TAU;

use crate::coords::{Rect, Vec2};

/// How an open stroke ends.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LineCap {
    /// Square end flush with the end angle.
    #[default]
    Butt,
    /// Half-disc of the stroke width centred on the end point.
    Round,
}

/// A stroked circular arc.
///
/// An arc with a non-positive radius, width or sweep (or any non-finite
/// component) is empty and draws nothing. A sweep of `2π` or more is a
/// closed circle with no caps.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcPath {
    pub center: Vec2,
    pub radius: f32,
    /// Start angle in radians.
    pub start: f32,
    /// Clockwise extent in radians, clamped to `2π`.
    pub sweep: f32,
    /// Stroke width in logical pixels.
    pub width: f32,
    pub cap: LineCap,
}

impl ArcPath {
    pub const EMPTY: ArcPath = ArcPath {
        center: Vec2::zero(),
        radius: 0.0,
        start: 0.0,
        sweep: 0.0,
        width: 0.0,
        cap: LineCap::Butt,
    };

    pub fn new(center: Vec2, radius: f32, start: f32, sweep: f32, width: f32, cap: LineCap) -> Self {
        let path = Self { center, radius, start, sweep: sweep.min(TAU), width, cap };
        if path.is_empty() { Self::EMPTY } else { path }
    }

    /// Closed circle.
    #[inline]
    pub fn circle(center: Vec2, radius: f32, width: f32) -> Self {
        Self::new(center, radius, 0.0, TAU, width, LineCap::Butt)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.radius > 0.0 && self.width > 0.0 && self.sweep > 0.0)
            || !self.center.is_finite()
            || !self.start.is_finite()
            || !self.radius.is_finite()
            || !self.width.is_finite()
    }

    #[inline]
    pub fn is_full_circle(&self) -> bool {
        !self.is_empty() && self.sweep >= TAU
    }

    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.sweep
    }

    /// Point on the centre line at `angle`.
    #[inline]
    pub fn point_at(&self, angle: f32) -> Vec2 {
        self.center + Vec2::from_angle(angle) * self.radius
    }

    /// Conservative bounding box of the stroke (caps included).
    pub fn bounds(&self) -> Rect {
        if self.is_empty() {
            return Rect::default();
        }
        Rect::square_centered(self.center, 2.0 * (self.radius + self.width * 0.5))
    }

    /// Signed distance from `p` to the stroke outline; negative inside.
    ///
    /// Empty paths report `+∞`.
    pub fn distance(&self, p: Vec2) -> f32 {
        if self.is_empty() {
            return f32::INFINITY;
        }
        let half = self.width * 0.5;
        let d = p - self.center;
        let radial = (d.length() - self.radius).abs() - half;
        if self.sweep >= TAU {
            return radial;
        }

        let rel = (d.angle() - self.start).rem_euclid(TAU);
        if rel <= self.sweep {
            return radial;
        }

        match self.cap {
            LineCap::Round => {
                let a = (p - self.point_at(self.start)).length();
                let b = (p - self.point_at(self.end())).length();
                a.min(b) - half
            }
            LineCap::Butt => self
                .cap_segment_distance(p, self.start)
                .min(self.cap_segment_distance(p, self.end())),
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.distance(p) <= 0.0
    }

    /// Distance to the radial segment closing a butt end at `angle`.
    fn cap_segment_distance(&self, p: Vec2, angle: f32) -> f32 {
        let dir = Vec2::from_angle(angle);
        let half = self.width * 0.5;
        let along = (p - self.center).dot(dir).clamp(self.radius - half, self.radius + half);
        (p - (self.center + dir * along)).length()
    }
}

impl Default for ArcPath {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, PI};

    fn quarter(cap: LineCap) -> ArcPath {
        ArcPath::new(Vec2::new(100.0, 100.0), 50.0, 0.0, FRAC_PI_2, 10.0, cap)
    }

    #[test]
    fn invalid_inputs_collapse_to_empty() {
        let c = Vec2::new(10.0, 10.0);
        assert!(ArcPath::new(c, 0.0, 0.0, PI, 4.0, LineCap::Butt).is_empty());
        assert!(ArcPath::new(c, -3.0, 0.0, PI, 4.0, LineCap::Butt).is_empty());
        assert!(ArcPath::new(c, 10.0, 0.0, 0.0, 4.0, LineCap::Butt).is_empty());
        assert!(ArcPath::new(c, 10.0, 0.0, PI, 0.0, LineCap::Butt).is_empty());
        assert!(ArcPath::new(c, f32::NAN, 0.0, PI, 4.0, LineCap::Butt).is_empty());
        assert_eq!(ArcPath::new(c, 10.0, 0.0, -1.0, 4.0, LineCap::Round), ArcPath::EMPTY);
    }

    #[test]
    fn sweep_clamps_to_full_turn() {
        let p = ArcPath::new(Vec2::zero(), 10.0, 0.0, 3.0 * TAU, 2.0, LineCap::Butt);
        assert_eq!(p.sweep, TAU);
        assert!(p.is_full_circle());
    }

    #[test]
    fn clockwise_on_screen() {
        // A quarter turn from 3 o'clock ends at 6 o'clock (+Y is down).
        let p = quarter(LineCap::Butt);
        let end = p.point_at(p.end());
        assert!((end.x - 100.0).abs() < 1e-3);
        assert!((end.y - 150.0).abs() < 1e-3);
        // 4:30 direction is inside the sweep, 1:30 is not.
        assert!(p.contains(Vec2::new(100.0 + 35.36, 100.0 + 35.36)));
        assert!(!p.contains(Vec2::new(100.0 + 35.36, 100.0 - 35.36)));
    }

    #[test]
    fn distance_inside_stroke_is_negative() {
        let p = quarter(LineCap::Butt);
        let on_centre_line = p.point_at(0.3);
        assert!((p.distance(on_centre_line) + 5.0).abs() < 1e-3);
        assert!(p.distance(Vec2::new(100.0, 100.0)) > 0.0);
    }

    #[test]
    fn round_cap_extends_past_end_angle() {
        let butt = quarter(LineCap::Butt);
        let round = quarter(LineCap::Round);
        // Just "before" the start angle, on the centre line.
        let probe = Vec2::new(150.0, 97.0);
        assert!(!butt.contains(probe));
        assert!(round.contains(probe));
    }

    #[test]
    fn empty_path_is_infinitely_far() {
        assert_eq!(ArcPath::EMPTY.distance(Vec2::zero()), f32::INFINITY);
        assert!(ArcPath::EMPTY.bounds().is_empty());
    }

    #[test]
    fn bounds_cover_stroke() {
        let c = ArcPath::circle(Vec2::new(50.0, 50.0), 40.0, 10.0);
        assert_eq!(c.bounds(), Rect::new(5.0, 5.0, 90.0, 90.0));
    }
}
