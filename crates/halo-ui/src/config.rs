use std::time::Duration;

use halo_engine::paint::Color;

/// Appearance and timing shared by the three rings of a group.
///
/// Plain data with by-value setters:
///
/// ```rust,ignore
/// let config = RingGroupConfig::default()
///     .ring_width(16.0)
///     .animation_duration(Duration::from_millis(800));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RingGroupConfig {
    /// Stroke width of every ring, in logical pixels.
    pub ring_width: f32,
    /// Gap between neighbouring rings.
    pub ring_padding: f32,
    /// Duration of animated value changes.
    pub animation_duration: Duration,
    /// Opaque colour of the background track.
    pub track_color: Color,
    /// Blur radius of the tip shadow.
    pub shadow_radius: f32,
    /// Starting primary colours, inner to outer.
    pub ring_colors: [Color; 3],
}

impl Default for RingGroupConfig {
    fn default() -> Self {
        Self {
            ring_width: 20.0,
            ring_padding: 1.0,
            animation_duration: Duration::from_millis(1500),
            track_color: Color::gray(1.0 / 3.0),
            shadow_radius: 12.0,
            ring_colors: [
                Color::from_srgb_u8(0xfa, 0x11, 0x4f, 0xff), // pink
                Color::from_srgb_u8(0x9c, 0xf5, 0x0e, 0xff), // green
                Color::from_srgb_u8(0x1c, 0xd8, 0xf0, 0xff), // blue
            ],
        }
    }
}

impl RingGroupConfig {
    pub fn ring_width(mut self, width: f32) -> Self {
        self.ring_width = width;
        self
    }

    pub fn ring_padding(mut self, padding: f32) -> Self {
        self.ring_padding = padding;
        self
    }

    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    pub fn track_color(mut self, color: Color) -> Self {
        self.track_color = color;
        self
    }

    pub fn shadow_radius(mut self, radius: f32) -> Self {
        self.shadow_radius = radius;
        self
    }

    pub fn ring_colors(mut self, colors: [Color; 3]) -> Self {
        self.ring_colors = colors;
        self
    }

    /// Distance between the edges of neighbouring rings' bounds, per side.
    #[inline]
    pub fn ring_step(&self) -> f32 {
        self.ring_width + self.ring_padding
    }
}
