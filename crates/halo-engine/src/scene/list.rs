use crate::geom::ArcPath;
use crate::paint::{Color, Paint};

use super::{ArcCmd, DrawCmd, ShadowCmd};

/// Recorded draw stream for a frame.
///
/// Commands are painted in insertion order. Empty paths are dropped at push
/// time so renderers never see degenerate geometry.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - `clear()` keeps capacity, so a warmed list does not allocate per frame
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Commands in paint order (back-to-front).
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records a command unless its path is empty.
    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        if cmd.path().is_empty() {
            return;
        }
        self.items.push(cmd);
    }

    /// Records an arc stroke.
    #[inline]
    pub fn push_arc(&mut self, path: ArcPath, paint: impl Into<Paint>) {
        self.push(DrawCmd::Arc(ArcCmd { path, paint: paint.into() }));
    }

    /// Records a masked soft shadow.
    #[inline]
    pub fn push_shadow(&mut self, path: ArcPath, color: Color, blur_radius: f32, mask: ArcPath) {
        self.push(DrawCmd::Shadow(ShadowCmd { path, color, blur_radius, mask }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;

    #[test]
    fn keeps_insertion_order() {
        let mut list = DrawList::new();
        let a = ArcPath::circle(Vec2::new(10.0, 10.0), 5.0, 2.0);
        let b = ArcPath::circle(Vec2::new(10.0, 10.0), 8.0, 2.0);
        list.push_arc(a, Color::WHITE);
        list.push_shadow(b, Color::BLACK, 12.0, a);
        list.push_arc(b, Color::BLACK);

        assert_eq!(list.len(), 3);
        assert!(matches!(list.items()[0], DrawCmd::Arc(ref c) if c.path == a));
        assert!(matches!(list.items()[1], DrawCmd::Shadow(_)));
        assert!(matches!(list.items()[2], DrawCmd::Arc(ref c) if c.path == b));
    }

    #[test]
    fn empty_paths_are_skipped() {
        let mut list = DrawList::new();
        list.push_arc(ArcPath::EMPTY, Color::WHITE);
        list.push_shadow(ArcPath::EMPTY, Color::BLACK, 12.0, ArcPath::EMPTY);
        assert!(list.is_empty());
    }

    #[test]
    fn clear_resets() {
        let mut list = DrawList::new();
        list.push_arc(ArcPath::circle(Vec2::zero(), 4.0, 1.0), Color::WHITE);
        list.clear();
        assert!(list.is_empty());
    }
}
