use halo_engine::geom::ArcPath;
use halo_engine::paint::{Color, Paint};
use halo_engine::scene::DrawList;

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList` with the two operations rings need.
/// Commands are recorded in call order, which is paint order.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList) -> Self {
        Self { draw_list }
    }

    /// Strokes `path` with `paint`. Empty paths are ignored.
    #[inline]
    pub fn stroke(&mut self, path: ArcPath, paint: impl Into<Paint>) {
        self.draw_list.push_arc(path, paint);
    }

    /// Draws a blurred copy of `path` in `color`, clipped to `mask`.
    #[inline]
    pub fn shadow(&mut self, path: ArcPath, color: Color, blur_radius: f32, mask: ArcPath) {
        self.draw_list.push_shadow(path, color, blur_radius, mask);
    }
}
