//! CPU rasterizer for ring draw streams.
//!
//! Every pixel centre inside a command's bounds is evaluated against the
//! path's signed distance; coverage is `clamp(0.5 − d, 0, 1)`, which gives a
//! one-pixel anti-aliased edge. Paint is evaluated per pixel, so angular
//! gradients run the same formula as the GPU fragment shader.

use crate::coords::{Rect, Vec2};
use crate::geom::ArcPath;
use crate::paint::Color;
use crate::scene::{ArcCmd, DrawCmd, DrawList, ShadowCmd};

/// Premultiplied RGBA pixel buffer in logical pixels (scale 1).
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Paints every command of `list`, back to front.
    pub fn draw(&mut self, list: &DrawList) {
        log::trace!("raster: {} commands on {}x{}", list.len(), self.width, self.height);
        for cmd in list.items() {
            match cmd {
                DrawCmd::Arc(arc) => self.stroke_arc(arc),
                DrawCmd::Shadow(shadow) => self.shadow(shadow),
            }
        }
    }

    /// Straight-alpha RGBA8 bytes, row-major, for image encoders.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba8()).collect()
    }

    fn stroke_arc(&mut self, cmd: &ArcCmd) {
        let Some((x0, y0, x1, y1)) = self.pixel_span(cmd.path.bounds()) else { return };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = pixel_center(x, y);
                let cov = coverage(cmd.path.distance(p));
                if cov <= 0.0 {
                    continue;
                }
                let src = cmd.paint.color_at(p).scale(cov);
                self.blend(x, y, src);
            }
        }
    }

    fn shadow(&mut self, cmd: &ShadowCmd) {
        let sigma = cmd.blur_radius.max(0.0) * 0.5;
        let reach = cmd.path.bounds().outset(3.0 * sigma);
        let Some(area) = cmd.mask.bounds().intersect(reach) else { return };
        let Some((x0, y0, x1, y1)) = self.pixel_span(area) else { return };

        for y in y0..y1 {
            for x in x0..x1 {
                let p = pixel_center(x, y);
                let mask = coverage(cmd.mask.distance(p));
                if mask <= 0.0 {
                    continue;
                }
                let a = shadow_falloff(&cmd.path, p, sigma) * mask;
                if a <= 0.0 {
                    continue;
                }
                self.blend(x, y, cmd.color.scale(a));
            }
        }
    }

    /// Clamps `bounds` to the canvas and returns `(x0, y0, x1, y1)` pixel bounds.
    fn pixel_span(&self, bounds: Rect) -> Option<(u32, u32, u32, u32)> {
        let canvas = Rect::new(0.0, 0.0, self.width as f32, self.height as f32);
        let r = canvas.intersect(bounds)?;
        let x0 = r.origin.x.floor() as u32;
        let y0 = r.origin.y.floor() as u32;
        let x1 = (r.max().x.ceil() as u32).min(self.width);
        let y1 = (r.max().y.ceil() as u32).min(self.height);
        if x0 >= x1 || y0 >= y1 { None } else { Some((x0, y0, x1, y1)) }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn blend(&mut self, x: u32, y: u32, src: Color) {
        let i = self.index(x, y);
        self.pixels[i] = src.over(self.pixels[i]);
    }
}

#[inline]
fn pixel_center(x: u32, y: u32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

#[inline]
fn coverage(distance: f32) -> f32 {
    (0.5 - distance).clamp(0.0, 1.0)
}

/// Gaussian falloff of a blurred stroke: 1 inside, `exp(−d²/2σ²)` outside.
fn shadow_falloff(path: &ArcPath, p: Vec2, sigma: f32) -> f32 {
    let d = path.distance(p);
    if sigma <= 0.0 {
        return coverage(d);
    }
    let d = d.max(0.0);
    (-0.5 * (d / sigma) * (d / sigma)).exp()
}
