use halo_engine::coords::Rect;

use crate::painter::Painter;

/// A retained, explicitly-invalidated piece of UI.
///
/// Widgets keep their own state between frames. Nothing repaints on its own:
/// a widget raises [`needs_redraw`](Widget::needs_redraw) when something
/// visible changed and [`Scene::frame`](crate::scene::Scene::frame) repaints
/// and calls [`mark_clean`](Widget::mark_clean).
pub trait Widget {
    /// Places the widget inside `container` (logical pixels).
    fn layout(&mut self, container: Rect);

    /// Steps running animations by `dt` seconds. Returns `true` while any
    /// animation is still in flight.
    fn advance(&mut self, _dt: f32) -> bool {
        false
    }

    /// Records draw commands, back to front.
    fn paint(&self, painter: &mut Painter<'_>);

    fn needs_redraw(&self) -> bool;

    fn mark_clean(&mut self);
}
