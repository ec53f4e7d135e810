use std::str::FromStr;
use std::time::Duration;

use halo_engine::coords::Rect;
use halo_engine::paint::Color;

use crate::anim::Transaction;
use crate::config::RingGroupConfig;
use crate::error::RingIndexError;
use crate::events::{EventBus, GroupId, RingEvent, RingEventKind};
use crate::painter::Painter;
use crate::widget::Widget;

use super::ring::RingNode;

// ── RingIndex ─────────────────────────────────────────────────────────────

/// Position of a ring in a group. The set is fixed and never reordered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RingIndex {
    Inner = 0,
    Middle = 1,
    Outer = 2,
}

impl RingIndex {
    pub const ALL: [RingIndex; 3] = [RingIndex::Inner, RingIndex::Middle, RingIndex::Outer];

    #[inline]
    pub fn as_usize(self) -> usize {
        self as usize
    }

    /// Concentric step counted from the outside: 0 for the outer ring.
    #[inline]
    pub fn layout_step(self) -> u32 {
        2 - self as u32
    }

    /// The other two rings, in index order.
    pub fn siblings(self) -> [RingIndex; 2] {
        match self {
            RingIndex::Inner => [RingIndex::Middle, RingIndex::Outer],
            RingIndex::Middle => [RingIndex::Inner, RingIndex::Outer],
            RingIndex::Outer => [RingIndex::Inner, RingIndex::Middle],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RingIndex::Inner => "inner",
            RingIndex::Middle => "middle",
            RingIndex::Outer => "outer",
        }
    }
}

impl FromStr for RingIndex {
    type Err = RingIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inner" | "0" => Ok(RingIndex::Inner),
            "middle" | "1" => Ok(RingIndex::Middle),
            "outer" | "2" => Ok(RingIndex::Outer),
            _ => Err(RingIndexError { input: s.to_string() }),
        }
    }
}

// ── pure helpers ──────────────────────────────────────────────────────────

/// Side of the square bounds for the ring at layout `step` (0 = outer).
///
/// Each step inwards loses `ring_width + padding` on every side. Can go
/// negative for small containers; callers treat that as an empty ring.
#[inline]
pub fn ring_size(min_side: f32, step: u32, ring_width: f32, padding: f32) -> f32 {
    min_side - step as f32 * (ring_width + padding) * 2.0
}

/// Event raised when a ring moves from `previous` to `new` while its two
/// siblings hold `siblings`.
///
/// Only an upward crossing of 1.0 raises anything; it is the "all" event
/// when both siblings are already full.
pub fn completion_event(previous: f32, new: f32, siblings: [f32; 2]) -> Option<RingEventKind> {
    if !(previous < 1.0 && new >= 1.0) {
        return None;
    }
    if siblings.iter().all(|&v| v >= 1.0) {
        Some(RingEventKind::AllRingsCompleted)
    } else {
        Some(RingEventKind::RingCompleted)
    }
}

// ── RingGroup ─────────────────────────────────────────────────────────────

/// Three concentric rings with shared appearance and completion events.
///
/// ```rust,ignore
/// let bus = EventBus::new();
/// let mut group = RingGroup::new(bus.clone());
/// group.layout(Rect::new(0.0, 0.0, 300.0, 300.0));
/// group.set_value(RingIndex::Inner, 1.0, true);
/// bus.dispatch(); // RingCompleted
/// ```
#[derive(Debug)]
pub struct RingGroup {
    id: GroupId,
    config: RingGroupConfig,
    container: Rect,
    rings: [RingNode; 3],
    events: EventBus,
}

impl RingGroup {
    pub fn new(events: EventBus) -> Self {
        Self::with_config(RingGroupConfig::default(), events)
    }

    pub fn with_config(config: RingGroupConfig, events: EventBus) -> Self {
        let ring = |i: usize| {
            let mut node = RingNode::new(config.ring_width, config.ring_colors[i], config.track_color);
            node.set_shadow_radius(config.shadow_radius);
            node
        };
        let rings = [ring(0), ring(1), ring(2)];
        Self {
            id: GroupId::next(),
            config,
            container: Rect::default(),
            rings,
            events,
        }
    }

    #[inline]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[inline]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    #[inline]
    pub fn config(&self) -> &RingGroupConfig {
        &self.config
    }

    #[inline]
    pub fn ring(&self, index: RingIndex) -> &RingNode {
        &self.rings[index.as_usize()]
    }

    // ── layout ────────────────────────────────────────────────────────────

    /// Centres the three rings in `container`, outer ring filling its
    /// shorter side.
    pub fn layout(&mut self, container: Rect) {
        self.container = container;
        let min_side = container.min_side();
        let center = container.center();

        for index in RingIndex::ALL {
            let size = ring_size(
                min_side,
                index.layout_step(),
                self.config.ring_width,
                self.config.ring_padding,
            );
            if size <= self.config.ring_width {
                log::warn!(
                    "{}: {} ring has no room ({size} px in a {min_side} px container)",
                    self.id,
                    index.name()
                );
            }
            self.rings[index.as_usize()].set_bounds(Rect::square_centered(center, size));
        }

        log::debug!(
            "{}: layout in {:?} -> sizes {:?}",
            self.id,
            container,
            self.rings.each_ref().map(|r| r.bounds().size.x)
        );
    }

    #[inline]
    pub fn container(&self) -> Rect {
        self.container
    }

    /// Re-runs `layout` in the current container, if there has been one.
    fn relayout(&mut self) {
        if !self.container.is_empty() {
            self.layout(self.container);
        }
    }

    // ── values ────────────────────────────────────────────────────────────

    /// Sets a ring's progress and posts a completion event if it crossed 1.0.
    ///
    /// `animated` runs the change over the group's animation duration with
    /// ease-in-out; otherwise the ring jumps. The event reflects the logical
    /// values at the time of the call, not the animation.
    pub fn set_value(&mut self, index: RingIndex, value: f32, animated: bool) {
        let previous = self.value(index);
        let siblings = index.siblings().map(|s| self.value(s));
        let event = completion_event(previous, value, siblings);

        let tx = animated.then(|| Transaction::new(self.config.animation_duration));
        self.rings[index.as_usize()].set_value(value, tx.as_ref());

        if let Some(kind) = event {
            self.events.post(RingEvent { kind, group: self.id });
        }
    }

    #[inline]
    pub fn value(&self, index: RingIndex) -> f32 {
        self.rings[index.as_usize()].value()
    }

    pub fn inner_value(&self) -> f32 {
        self.value(RingIndex::Inner)
    }

    pub fn set_inner_value(&mut self, value: f32) {
        self.set_value(RingIndex::Inner, value, false);
    }

    pub fn middle_value(&self) -> f32 {
        self.value(RingIndex::Middle)
    }

    pub fn set_middle_value(&mut self, value: f32) {
        self.set_value(RingIndex::Middle, value, false);
    }

    pub fn outer_value(&self) -> f32 {
        self.value(RingIndex::Outer)
    }

    pub fn set_outer_value(&mut self, value: f32) {
        self.set_value(RingIndex::Outer, value, false);
    }

    // ── colours ───────────────────────────────────────────────────────────

    pub fn set_ring_color(&mut self, index: RingIndex, color: Color) {
        self.rings[index.as_usize()].set_colors(color);
    }

    #[inline]
    pub fn ring_color(&self, index: RingIndex) -> Color {
        self.rings[index.as_usize()].primary_color()
    }

    pub fn inner_color(&self) -> Color {
        self.ring_color(RingIndex::Inner)
    }

    pub fn set_inner_color(&mut self, color: Color) {
        self.set_ring_color(RingIndex::Inner, color);
    }

    pub fn middle_color(&self) -> Color {
        self.ring_color(RingIndex::Middle)
    }

    pub fn set_middle_color(&mut self, color: Color) {
        self.set_ring_color(RingIndex::Middle, color);
    }

    pub fn outer_color(&self) -> Color {
        self.ring_color(RingIndex::Outer)
    }

    pub fn set_outer_color(&mut self, color: Color) {
        self.set_ring_color(RingIndex::Outer, color);
    }

    // ── group appearance ──────────────────────────────────────────────────

    pub fn set_ring_width(&mut self, width: f32) {
        self.config.ring_width = width;
        for ring in &mut self.rings {
            ring.set_stroke_width(width);
        }
        self.relayout();
    }

    #[inline]
    pub fn ring_width(&self) -> f32 {
        self.config.ring_width
    }

    pub fn set_ring_padding(&mut self, padding: f32) {
        self.config.ring_padding = padding;
        self.relayout();
    }

    #[inline]
    pub fn ring_padding(&self) -> f32 {
        self.config.ring_padding
    }

    pub fn set_track_color(&mut self, color: Color) {
        self.config.track_color = color;
        for ring in &mut self.rings {
            ring.set_track_color(color);
        }
    }

    #[inline]
    pub fn track_color(&self) -> Color {
        self.config.track_color
    }

    /// Applies to changes made after this call.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.config.animation_duration = duration;
    }

    #[inline]
    pub fn animation_duration(&self) -> Duration {
        self.config.animation_duration
    }

    pub fn set_shadow_radius(&mut self, radius: f32) {
        self.config.shadow_radius = radius;
        for ring in &mut self.rings {
            ring.set_shadow_radius(radius);
        }
    }
}

impl Widget for RingGroup {
    fn layout(&mut self, container: Rect) {
        RingGroup::layout(self, container);
    }

    fn advance(&mut self, dt: f32) -> bool {
        let mut animating = false;
        for ring in &mut self.rings {
            animating |= ring.advance(dt);
        }
        animating
    }

    fn paint(&self, painter: &mut Painter<'_>) {
        for ring in &self.rings {
            ring.paint(painter);
        }
    }

    fn needs_redraw(&self) -> bool {
        self.rings.iter().any(RingNode::needs_redraw)
    }

    fn mark_clean(&mut self) {
        for ring in &mut self.rings {
            ring.mark_clean();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    const CONTAINER: Rect = Rect::new(0.0, 0.0, 300.0, 300.0);

    fn group() -> (RingGroup, EventBus) {
        let bus = EventBus::new();
        let mut g = RingGroup::new(bus.clone());
        g.layout(CONTAINER);
        (g, bus)
    }

    fn kinds(bus: &EventBus) -> Vec<RingEventKind> {
        bus.take_events().into_iter().map(|e| e.kind).collect()
    }

    // ── index ─────────────────────────────────────────────────────────────

    #[test]
    fn ring_index_parses_names_and_numbers() {
        assert_eq!("inner".parse::<RingIndex>(), Ok(RingIndex::Inner));
        assert_eq!(" Middle ".parse::<RingIndex>(), Ok(RingIndex::Middle));
        assert_eq!("2".parse::<RingIndex>(), Ok(RingIndex::Outer));
        let err = "3".parse::<RingIndex>().unwrap_err();
        assert_eq!(err.input, "3");
        assert!(err.to_string().contains("unknown ring"));
    }

    #[test]
    fn siblings_exclude_self() {
        for i in RingIndex::ALL {
            assert!(!i.siblings().contains(&i));
        }
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn sizes_shrink_by_two_steps_per_ring() {
        assert_eq!(ring_size(300.0, 0, 20.0, 1.0), 300.0);
        assert_eq!(ring_size(300.0, 1, 20.0, 1.0), 258.0);
        assert_eq!(ring_size(300.0, 2, 20.0, 1.0), 216.0);
    }

    #[test]
    fn default_group_in_300_square() {
        let (g, _) = group();
        assert_eq!(g.ring(RingIndex::Inner).bounds().size.x, 216.0);
        assert_eq!(g.ring(RingIndex::Middle).bounds().size.x, 258.0);
        assert_eq!(g.ring(RingIndex::Outer).bounds().size.x, 300.0);
        for i in RingIndex::ALL {
            assert_eq!(g.ring(i).bounds().center(), CONTAINER.center());
        }
    }

    #[test]
    fn neighbouring_strokes_do_not_overlap() {
        let (g, _) = group();
        let r = |i| g.ring(i).geometry().radius();
        let w = g.ring_width();
        // Inner edge of the outer stroke lies outside the outer edge of the inner one.
        assert!(r(RingIndex::Outer) - w / 2.0 >= r(RingIndex::Middle) + w / 2.0);
        assert!(r(RingIndex::Middle) - w / 2.0 >= r(RingIndex::Inner) + w / 2.0);
        assert_eq!(r(RingIndex::Outer) - r(RingIndex::Middle), w + g.ring_padding());
    }

    #[test]
    fn non_square_container_uses_shorter_side() {
        let bus = EventBus::new();
        let mut g = RingGroup::new(bus);
        g.layout(Rect::new(10.0, 10.0, 400.0, 300.0));
        assert_eq!(g.ring(RingIndex::Outer).bounds().size.x, 300.0);
        assert_eq!(g.ring(RingIndex::Outer).bounds().center(), Rect::new(10.0, 10.0, 400.0, 300.0).center());
    }

    #[test]
    fn tiny_container_gives_empty_inner_geometry() {
        let bus = EventBus::new();
        let mut g = RingGroup::new(bus);
        g.layout(Rect::new(0.0, 0.0, 60.0, 60.0));
        assert!(g.ring(RingIndex::Inner).geometry().track.is_empty());
        assert!(!g.ring(RingIndex::Outer).geometry().track.is_empty());
    }

    #[test]
    fn ring_width_change_relays_out() {
        let (mut g, _) = group();
        g.set_ring_width(10.0);
        assert_eq!(g.ring(RingIndex::Middle).bounds().size.x, 278.0);
        assert_eq!(g.ring(RingIndex::Middle).stroke_width(), 10.0);
        g.set_ring_padding(5.0);
        assert_eq!(g.ring(RingIndex::Inner).bounds().size.x, 240.0);
    }

    #[test]
    fn appearance_changes_before_layout_defer_to_it() {
        let mut g = RingGroup::new(EventBus::new());
        g.set_ring_width(10.0);
        g.set_ring_padding(5.0);
        assert!(g.container().is_empty());
        for index in RingIndex::ALL {
            assert_eq!(g.ring(index).bounds(), Rect::default());
            assert_eq!(g.ring(index).stroke_width(), 10.0);
        }

        g.layout(CONTAINER);
        assert_eq!(g.ring(RingIndex::Inner).bounds().size.x, 240.0);
    }

    // ── completion events ─────────────────────────────────────────────────

    #[test]
    fn completion_predicate() {
        use RingEventKind::*;
        assert_eq!(completion_event(0.0, 1.0, [0.0, 0.0]), Some(RingCompleted));
        assert_eq!(completion_event(0.99, 1.5, [1.0, 0.5]), Some(RingCompleted));
        assert_eq!(completion_event(0.5, 1.0, [1.0, 1.0]), Some(AllRingsCompleted));
        assert_eq!(completion_event(1.0, 1.2, [1.0, 1.0]), None);
        assert_eq!(completion_event(1.0, 0.0, [1.0, 1.0]), None);
        assert_eq!(completion_event(0.2, 0.9, [1.0, 1.0]), None);
    }

    #[test]
    fn inner_middle_outer_scenario() {
        let (mut g, bus) = group();

        g.set_value(RingIndex::Outer, 0.6, false);
        assert_eq!(bus.pending(), 0);

        g.set_value(RingIndex::Inner, 1.0, false);
        assert_eq!(kinds(&bus), [RingEventKind::RingCompleted]);

        g.set_value(RingIndex::Middle, 1.0, false);
        assert_eq!(kinds(&bus), [RingEventKind::RingCompleted]);

        g.set_value(RingIndex::Outer, 1.0, false);
        assert_eq!(kinds(&bus), [RingEventKind::AllRingsCompleted]);
    }

    #[test]
    fn events_carry_group_id() {
        let (mut g, bus) = group();
        g.set_outer_value(1.0);
        let events = bus.take_events();
        assert_eq!(events, [RingEvent { kind: RingEventKind::RingCompleted, group: g.id() }]);
    }

    #[test]
    fn same_side_and_downward_moves_are_silent() {
        let (mut g, bus) = group();
        g.set_value(RingIndex::Inner, 0.3, false);
        g.set_value(RingIndex::Inner, 0.9, false);
        assert_eq!(bus.pending(), 0);

        g.set_value(RingIndex::Inner, 1.0, false);
        bus.take_events();
        g.set_value(RingIndex::Inner, 1.4, false);
        g.set_value(RingIndex::Inner, 0.2, false);
        assert_eq!(bus.pending(), 0);
    }

    #[test]
    fn recrossing_after_reset_fires_again() {
        let (mut g, bus) = group();
        g.set_inner_value(1.0);
        g.set_inner_value(0.0);
        g.set_inner_value(1.0);
        assert_eq!(kinds(&bus), [RingEventKind::RingCompleted, RingEventKind::RingCompleted]);
    }

    #[test]
    fn animated_set_posts_immediately_and_uses_logical_values() {
        let (mut g, bus) = group();
        g.set_value(RingIndex::Inner, 1.0, true);
        g.set_value(RingIndex::Middle, 1.0, true);
        // Nothing has been presented yet, but the logical values count.
        assert_eq!(g.ring(RingIndex::Inner).presented_value(), 0.0);
        g.set_value(RingIndex::Outer, 1.0, true);
        assert_eq!(
            kinds(&bus),
            [RingEventKind::RingCompleted, RingEventKind::RingCompleted, RingEventKind::AllRingsCompleted]
        );
    }

    #[test]
    fn subscribers_only_hear_after_dispatch() {
        let (mut g, bus) = group();
        let heard = Rc::new(RefCell::new(Vec::new()));
        let sink = heard.clone();
        bus.subscribe(move |e| sink.borrow_mut().push(e.kind));

        g.set_inner_value(1.0);
        assert!(heard.borrow().is_empty());
        bus.dispatch();
        assert_eq!(*heard.borrow(), [RingEventKind::RingCompleted]);
    }

    // ── appearance ────────────────────────────────────────────────────────

    #[test]
    fn colors_round_trip() {
        let (mut g, _) = group();
        let c = Color::from_straight(0.1, 0.2, 0.9, 1.0);
        g.set_middle_color(c);
        assert_eq!(g.middle_color(), c);
        g.set_ring_color(RingIndex::Outer, c);
        assert_eq!(g.outer_color(), c);
        g.set_inner_color(c);
        assert_eq!(g.inner_color(), c);
        assert_eq!(g.ring(RingIndex::Inner).colors().1, c.darker());
    }

    #[test]
    fn default_config_applies_to_rings() {
        let (g, _) = group();
        let cfg = RingGroupConfig::default();
        assert_eq!(g.animation_duration(), Duration::from_millis(1500));
        for i in RingIndex::ALL {
            assert_eq!(g.ring_color(i), cfg.ring_colors[i.as_usize()]);
            assert_eq!(g.ring(i).track_color(), cfg.track_color);
            assert_eq!(g.ring(i).shadow_radius(), 12.0);
        }
    }

    #[test]
    fn group_redraw_follows_rings() {
        let (mut g, _) = group();
        g.mark_clean();
        assert!(!g.needs_redraw());
        g.set_track_color(Color::WHITE);
        assert!(g.needs_redraw());
        assert_eq!(g.track_color(), Color::WHITE);
    }
}
