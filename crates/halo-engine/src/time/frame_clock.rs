use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Total simulated time since the clock started, in seconds.
    pub elapsed: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

#[derive(Debug, Clone)]
enum Source {
    /// Measures real time between ticks.
    Wall { last: Instant },
    /// Advances by a constant step on every tick.
    Fixed { step: Duration },
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Wall clocks drive interactive hosts; fixed clocks drive offline rendering
/// and tests, where every run must produce the same animation samples.
///
/// Wall-clock delta time is clamped to avoid pathological values when the
/// host is paused by the debugger or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    source: Source,
    elapsed: f64,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a wall clock with default clamps.
    ///
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum prevents animations jumping to the end after long stalls
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a wall clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            source: Source::Wall { last: Instant::now() },
            elapsed: 0.0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Creates a deterministic clock advancing by `step` per tick.
    pub fn fixed(step: Duration) -> Self {
        Self {
            source: Source::Fixed { step },
            elapsed: 0.0,
            frame_index: 0,
            dt_min: Duration::ZERO,
            dt_max: Duration::MAX,
        }
    }

    /// Deterministic clock ticking `fps` times per simulated second.
    pub fn at_fps(fps: u32) -> Self {
        Self::fixed(Duration::from_secs_f64(1.0 / fps.max(1) as f64))
    }

    /// Resets the clock baseline.
    ///
    /// Useful when resuming from suspension; the next wall tick measures from now.
    pub fn reset(&mut self) {
        if let Source::Wall { last } = &mut self.source {
            *last = Instant::now();
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let dt = match &mut self.source {
            Source::Wall { last } => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(*last);
                *last = now;
                dt.clamp(self.dt_min, self.dt_max)
            }
            Source::Fixed { step } => *step,
        };

        self.elapsed += dt.as_secs_f64();

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed as f32,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_deterministic() {
        let mut clock = FrameClock::at_fps(60);
        let a = clock.tick();
        let b = clock.tick();
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
        assert!((a.dt - 1.0 / 60.0).abs() < 1e-6);
        assert!((b.elapsed - 2.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn fixed_clock_accumulates_to_whole_seconds() {
        let mut clock = FrameClock::fixed(Duration::from_millis(100));
        let last = (0..15).map(|_| clock.tick()).last().unwrap();
        assert!((last.elapsed - 1.5).abs() < 1e-5);
    }

    #[test]
    fn wall_clock_respects_clamps() {
        let mut clock =
            FrameClock::with_clamps(Duration::from_millis(5), Duration::from_millis(10));
        let ft = clock.tick();
        assert!(ft.dt >= 0.005 - 1e-6 && ft.dt <= 0.010 + 1e-6);
    }

    #[test]
    fn zero_fps_is_treated_as_one() {
        let mut clock = FrameClock::at_fps(0);
        assert!((clock.tick().dt - 1.0).abs() < 1e-6);
    }
}
