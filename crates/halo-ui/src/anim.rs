//! Value animation driven by an explicit frame `dt`.
//!
//! A [`Transaction`] describes how one change should be presented; an
//! [`AnimatedValue`] keeps the logical target apart from the value currently
//! on screen and steps between them when the host calls `advance`.

use std::time::Duration;

/// Timing curve applied to an animation's linear progress.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Cubic ease-in-out.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` (clamped to `[0, 1]`) onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Presentation parameters for a single value change.
///
/// Scoped to the call that passes it: nothing about a transaction outlives
/// the change it was applied to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transaction {
    pub duration: Duration,
    pub easing: Easing,
}

impl Transaction {
    pub fn new(duration: Duration) -> Self {
        Self { duration, easing: Easing::EaseInOut }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Animation {
    from: f32,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

/// A scalar with a logical target and an animated on-screen value.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedValue {
    target: f32,
    presented: f32,
    animation: Option<Animation>,
}

impl AnimatedValue {
    pub fn new(value: f32) -> Self {
        Self { target: value, presented: value, animation: None }
    }

    /// The logical value: what was last set, regardless of animation.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// The value currently on screen.
    #[inline]
    pub fn presented(&self) -> f32 {
        self.presented
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Sets the logical value.
    ///
    /// Without a transaction (or with a zero duration) the presented value
    /// jumps immediately. Otherwise the presented value runs from where it is
    /// now to `value`; a call during a running animation retargets it.
    pub fn set(&mut self, value: f32, tx: Option<&Transaction>) {
        self.target = value;
        let duration = tx.map_or(0.0, |t| t.duration.as_secs_f32());
        if duration > 0.0 && value.is_finite() && self.presented.is_finite() && self.presented != value {
            self.animation = Some(Animation {
                from: self.presented,
                elapsed: 0.0,
                duration,
                easing: tx.map(|t| t.easing).unwrap_or_default(),
            });
        } else {
            self.presented = value;
            self.animation = None;
        }
    }

    /// Steps a running animation by `dt` seconds.
    ///
    /// Returns `true` when the presented value changed.
    pub fn advance(&mut self, dt: f32) -> bool {
        let Some(anim) = self.animation.as_mut() else { return false };
        anim.elapsed += dt.max(0.0);

        let before = self.presented;
        if anim.elapsed >= anim.duration {
            self.presented = self.target;
            self.animation = None;
        } else {
            let k = anim.easing.apply(anim.elapsed / anim.duration);
            self.presented = anim.from + (self.target - anim.from) * k;
        }
        self.presented != before
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}
