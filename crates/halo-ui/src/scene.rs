use halo_engine::coords::{Rect, Viewport};
use halo_engine::scene::DrawList;

use crate::painter::Painter;
use crate::widget::Widget;

/// Per-host frame driver.
///
/// Owns the `DrawList` handed to renderers and decides, per frame, whether
/// the root needs a new layout or a repaint. When nothing changed the list
/// from the previous frame is kept as is.
///
/// ```rust,ignore
/// let mut scene = Scene::new();
/// // once per frame:
/// let list = scene.frame(&mut group, viewport, clock.tick().dt);
/// canvas.draw(list);
/// bus.dispatch();
/// ```
#[derive(Debug, Default)]
pub struct Scene {
    draw_list: DrawList,
    viewport: Option<Viewport>,
    repainted: bool,
    animating: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out (on viewport change), advances animations by `dt` and
    /// repaints if the root reports itself dirty.
    pub fn frame<W: Widget + ?Sized>(&mut self, root: &mut W, viewport: Viewport, dt: f32) -> &DrawList {
        if self.viewport != Some(viewport) {
            log::debug!("scene: viewport {}x{}", viewport.width, viewport.height);
            root.layout(Rect::new(0.0, 0.0, viewport.width, viewport.height));
            self.viewport = Some(viewport);
        }

        self.animating = root.advance(dt);

        self.repainted = root.needs_redraw();
        if self.repainted {
            self.draw_list.clear();
            root.paint(&mut Painter::new(&mut self.draw_list));
            root.mark_clean();
            log::trace!("scene: repainted {} commands", self.draw_list.len());
        }

        &self.draw_list
    }

    /// Forces a layout on the next frame.
    pub fn invalidate_layout(&mut self) {
        self.viewport = None;
    }

    #[inline]
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Whether the last `frame` call rebuilt the draw list.
    #[inline]
    pub fn repainted(&self) -> bool {
        self.repainted
    }

    /// Whether an animation was still running after the last `frame` call.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;
    use crate::widgets::three_ring::{RingGroup, RingIndex};

    const VIEWPORT: Viewport = Viewport::new(300.0, 300.0);

    #[test]
    fn first_frame_lays_out_and_paints() {
        let mut group = RingGroup::new(EventBus::new());
        let mut scene = Scene::new();
        let len = scene.frame(&mut group, VIEWPORT, 0.0).len();
        assert!(scene.repainted());
        // track, shadow, tip for each of three rings at zero progress
        assert_eq!(len, 9);
        assert_eq!(group.ring(RingIndex::Outer).bounds().size.x, 300.0);
    }

    #[test]
    fn clean_frames_keep_previous_list() {
        let mut group = RingGroup::new(EventBus::new());
        let mut scene = Scene::new();
        scene.frame(&mut group, VIEWPORT, 0.0);
        let len = scene.frame(&mut group, VIEWPORT, 1.0 / 60.0).len();
        assert!(!scene.repainted());
        assert_eq!(len, 9);
    }

    #[test]
    fn value_change_repaints_on_next_frame() {
        let mut group = RingGroup::new(EventBus::new());
        let mut scene = Scene::new();
        scene.frame(&mut group, VIEWPORT, 0.0);

        group.set_value(RingIndex::Middle, 0.5, false);
        let len = scene.frame(&mut group, VIEWPORT, 1.0 / 60.0).len();
        assert!(scene.repainted());
        assert_eq!(len, 10);
    }

    #[test]
    fn animation_runs_to_completion() {
        let mut group = RingGroup::new(EventBus::new());
        group.set_animation_duration(std::time::Duration::from_millis(100));
        let mut scene = Scene::new();
        scene.frame(&mut group, VIEWPORT, 0.0);

        group.set_value(RingIndex::Inner, 1.0, true);
        scene.frame(&mut group, VIEWPORT, 0.05);
        assert!(scene.is_animating());
        let mid = group.ring(RingIndex::Inner).presented_value();
        assert!(mid > 0.0 && mid < 1.0);

        scene.frame(&mut group, VIEWPORT, 0.06);
        assert!(!scene.is_animating());
        assert_eq!(group.ring(RingIndex::Inner).presented_value(), 1.0);
    }

    #[test]
    fn viewport_change_relays_out() {
        let mut group = RingGroup::new(EventBus::new());
        let mut scene = Scene::new();
        scene.frame(&mut group, VIEWPORT, 0.0);
        scene.frame(&mut group, Viewport::new(200.0, 400.0), 0.0);
        assert_eq!(group.ring(RingIndex::Outer).bounds().size.x, 200.0);
        assert!(scene.repainted());
    }
}
