use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Square of side `side` centred on `center`.
    ///
    /// Negative sides collapse to an empty rect at `center`.
    #[inline]
    pub fn square_centered(center: Vec2, side: f32) -> Self {
        let side = side.max(0.0);
        Rect::new(center.x - side * 0.5, center.y - side * 0.5, side, side)
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y * 0.5)
    }

    /// Length of the shorter side.
    #[inline]
    pub fn min_side(self) -> f32 {
        self.size.min_component()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Grows the rect by `d` on every side (shrinks for negative `d`).
    #[inline]
    pub fn outset(self, d: f32) -> Self {
        Rect::new(
            self.origin.x - d,
            self.origin.y - d,
            self.size.x + 2.0 * d,
            self.size.y + 2.0 * d,
        )
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.origin.x
            && p.y >= r.origin.y
            && p.x < (r.origin.x + r.size.x)
            && p.y < (r.origin.y + r.size.y)
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.origin.x.max(b.origin.x);
        let y0 = a.origin.y.max(b.origin.y);
        let x1 = (a.origin.x + a.size.x).min(b.origin.x + b.size.x);
        let y1 = (a.origin.y + a.size.y).min(b.origin.y + b.size.y);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── square_centered ───────────────────────────────────────────────────

    #[test]
    fn square_centered_shares_center() {
        let c = Vec2::new(150.0, 100.0);
        let sq = Rect::square_centered(c, 40.0);
        assert_eq!(sq, r(130.0, 80.0, 40.0, 40.0));
        assert_eq!(sq.center(), c);
    }

    #[test]
    fn square_centered_negative_side_is_empty() {
        let sq = Rect::square_centered(Vec2::new(10.0, 10.0), -5.0);
        assert!(sq.is_empty());
        assert_eq!(sq.origin, Vec2::new(10.0, 10.0));
    }

    // ── min_side / center ─────────────────────────────────────────────────

    #[test]
    fn min_side_picks_shorter_edge() {
        assert_eq!(r(0.0, 0.0, 300.0, 200.0).min_side(), 200.0);
        assert_eq!(r(0.0, 0.0, 80.0, 120.0).min_side(), 80.0);
    }

    #[test]
    fn center_of_offset_rect() {
        assert_eq!(r(10.0, 20.0, 100.0, 50.0).center(), Vec2::new(60.0, 45.0));
    }

    // ── normalized / contains ─────────────────────────────────────────────

    #[test]
    fn normalized_negative_width() {
        let n = r(10.0, 0.0, -4.0, 5.0).normalized();
        assert_eq!(n.origin.x, 6.0);
        assert_eq!(n.size.x, 4.0);
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(0.0, 0.0)));
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(10.0, 10.0)));
    }

    // ── intersect / outset ────────────────────────────────────────────────

    #[test]
    fn intersect_clips_to_overlap() {
        let canvas = r(0.0, 0.0, 64.0, 64.0);
        let shape = r(-8.0, 40.0, 32.0, 32.0);
        assert_eq!(canvas.intersect(shape), Some(r(0.0, 40.0, 24.0, 24.0)));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        assert!(r(0.0, 0.0, 10.0, 10.0).intersect(r(10.0, 0.0, 10.0, 10.0)).is_none());
    }

    #[test]
    fn outset_grows_every_side() {
        assert_eq!(r(10.0, 10.0, 20.0, 20.0).outset(5.0), r(5.0, 5.0, 30.0, 30.0));
    }
}
