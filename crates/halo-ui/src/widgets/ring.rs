use halo_engine::coords::Rect;
use halo_engine::geom::RingGeometry;
use halo_engine::paint::{AngularGradient, Color};

use crate::anim::{AnimatedValue, Transaction};
use crate::painter::Painter;
use crate::widget::Widget;

/// One progress ring: background track, gradient arc, tip and tip shadow.
///
/// Geometry is derived from bounds, stroke width and the *presented*
/// progress, and rebuilt whenever any of them changes. The logical progress
/// (what callers set) is kept separately so event logic never sees an
/// in-between animation frame.
#[derive(Debug, Clone)]
pub struct RingNode {
    bounds: Rect,
    stroke_width: f32,
    /// `(primary, primary.darker())`.
    colors: (Color, Color),
    track_color: Color,
    shadow_color: Color,
    shadow_radius: f32,
    value: AnimatedValue,
    geometry: RingGeometry,
    dirty: bool,
}

impl RingNode {
    pub fn new(stroke_width: f32, primary: Color, track_color: Color) -> Self {
        let mut node = Self {
            bounds: Rect::default(),
            stroke_width,
            colors: (primary, primary.darker()),
            track_color,
            shadow_color: Color::BLACK,
            shadow_radius: 12.0,
            value: AnimatedValue::new(0.0),
            geometry: RingGeometry::default(),
            dirty: true,
        };
        node.rebuild_geometry();
        node
    }

    // ── geometry inputs ───────────────────────────────────────────────────

    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds == bounds {
            return;
        }
        self.bounds = bounds;
        self.rebuild_geometry();
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        if self.stroke_width == width {
            return;
        }
        self.stroke_width = width;
        self.rebuild_geometry();
    }

    #[inline]
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    // ── colours ───────────────────────────────────────────────────────────

    /// Sets the primary colour; the gradient's second colour is derived.
    pub fn set_colors(&mut self, primary: Color) {
        self.colors = (primary, primary.darker());
        self.dirty = true;
    }

    #[inline]
    pub fn colors(&self) -> (Color, Color) {
        self.colors
    }

    /// The colour last passed to [`set_colors`](Self::set_colors), unchanged.
    #[inline]
    pub fn primary_color(&self) -> Color {
        self.colors.0
    }

    pub fn set_track_color(&mut self, color: Color) {
        self.track_color = color;
        self.dirty = true;
    }

    #[inline]
    pub fn track_color(&self) -> Color {
        self.track_color
    }

    pub fn set_shadow_radius(&mut self, radius: f32) {
        self.shadow_radius = radius.max(0.0);
        self.dirty = true;
    }

    #[inline]
    pub fn shadow_radius(&self) -> f32 {
        self.shadow_radius
    }

    // ── progress ──────────────────────────────────────────────────────────

    /// Sets the logical progress. With a transaction the drawn arc animates
    /// there from wherever it currently is; without one it jumps.
    ///
    /// Values outside `[0, 1]` are stored as given.
    pub fn set_value(&mut self, value: f32, tx: Option<&Transaction>) {
        self.value.set(value, tx);
        self.rebuild_geometry();
    }

    /// Logical progress.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value.target()
    }

    /// Progress currently drawn.
    #[inline]
    pub fn presented_value(&self) -> f32 {
        self.value.presented()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.value.is_animating()
    }

    /// Steps the progress animation. Returns `true` while it is running.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.value.advance(dt) {
            self.geometry = RingGeometry::new(self.bounds, self.stroke_width, self.value.presented());
            self.dirty = true;
            log::trace!("ring: presented {:.4}", self.value.presented());
        }
        self.value.is_animating()
    }

    #[inline]
    pub fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }

    // ── redraw ────────────────────────────────────────────────────────────

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Records the ring's four layers, back to front.
    pub fn paint(&self, painter: &mut Painter<'_>) {
        let g = &self.geometry;
        painter.stroke(g.track, self.track_color);
        painter.stroke(g.arc, AngularGradient::new(self.bounds, self.colors));
        painter.shadow(g.tip, self.shadow_color, self.shadow_radius, g.shadow_mask);
        painter.stroke(g.tip, self.colors.0);
    }

    fn rebuild_geometry(&mut self) {
        self.geometry = RingGeometry::new(self.bounds, self.stroke_width, self.value.presented());
        self.dirty = true;
        log::debug!(
            "ring: geometry rebuilt (bounds {:?}, stroke {}, progress {}, radius {})",
            self.bounds,
            self.stroke_width,
            self.value.presented(),
            self.geometry.radius()
        );
    }
}

impl Widget for RingNode {
    fn layout(&mut self, container: Rect) {
        self.set_bounds(container);
    }

    fn advance(&mut self, dt: f32) -> bool {
        RingNode::advance(self, dt)
    }

    fn paint(&self, painter: &mut Painter<'_>) {
        RingNode::paint(self, painter)
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
