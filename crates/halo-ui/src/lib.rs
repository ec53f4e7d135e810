//! Halo UI — concentric progress rings on top of `halo-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use halo_ui::prelude::*;
//!
//! let bus = EventBus::new();
//! bus.subscribe(|e| println!("{} from {}", e.kind, e.group));
//!
//! let mut rings = RingGroup::new(bus.clone());
//! let mut scene = Scene::new();
//!
//! rings.set_value(RingIndex::Inner, 0.8, true);
//!
//! // In your frame callback:
//! let draw_list = scene.frame(&mut rings, viewport, dt);
//! // Pass draw_list to a renderer (`Canvas::draw` or `ArcRenderer::render`).
//! bus.dispatch();
//! ```

pub mod anim;
pub mod config;
pub mod error;
pub mod events;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

/// Everything a host needs to drive rings.
pub mod prelude {
    pub use crate::anim::{AnimatedValue, Easing, Transaction};
    pub use crate::config::RingGroupConfig;
    pub use crate::error::RingIndexError;
    pub use crate::events::{EventBus, GroupId, RingEvent, RingEventKind, SubscriptionId};
    pub use crate::painter::Painter;
    pub use crate::scene::Scene;
    pub use crate::widget::Widget;
    pub use crate::widgets::ring::RingNode;
    pub use crate::widgets::three_ring::{RingGroup, RingIndex};

    // Engine primitives hosts touch directly.
    pub use halo_engine::coords::{Rect, Vec2, Viewport};
    pub use halo_engine::paint::Color;
}
