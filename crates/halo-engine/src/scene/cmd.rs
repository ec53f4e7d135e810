use crate::geom::ArcPath;
use crate::paint::{Color, Paint};

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a payload struct and a variant here
/// - add a push helper on `DrawList`
/// - teach both `render::raster::Canvas` and `render::shapes` to draw it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Arc(ArcCmd),
    Shadow(ShadowCmd),
}

/// Stroke of an arc with a paint source.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcCmd {
    pub path: ArcPath,
    pub paint: Paint,
}

/// Soft shadow cast by `path`, only visible inside `mask`.
///
/// The shadow has no offset: it is the stroke of `path` blurred by
/// `blur_radius` and tinted with `color`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowCmd {
    pub path: ArcPath,
    pub color: Color,
    pub blur_radius: f32,
    pub mask: ArcPath,
}

impl DrawCmd {
    /// Path whose empty-ness decides whether the command draws anything.
    #[inline]
    pub fn path(&self) -> &ArcPath {
        match self {
            DrawCmd::Arc(c) => &c.path,
            DrawCmd::Shadow(c) => &c.path,
        }
    }
}
