use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter. Keeps counting across surface rebuilds.
    pub frame_index: u64,

    /// The frame arrived noticeably later than one refresh interval.
    pub late: bool,
}

/// Frame clock paced against an expected display refresh interval.
///
/// Delta time is clamped to avoid pathological values when the application is paused
/// by the debugger, minimized, or stalls on a surface rebuild.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
    interval: Duration,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    const DT_MIN: Duration = Duration::from_micros(100);
    const DT_MAX: Duration = Duration::from_millis(250);

    /// Creates a clock expecting `refresh_rate_hz` ticks per second.
    ///
    /// A rate of zero is treated as 60 Hz.
    pub fn for_refresh_rate(refresh_rate_hz: u32) -> Self {
        let hz = if refresh_rate_hz == 0 { 60 } else { refresh_rate_hz };
        Self {
            last: None,
            frame_index: 0,
            interval: Duration::from_secs(1) / hz,
            dt_min: Self::DT_MIN,
            dt_max: Self::DT_MAX,
        }
    }

    /// Expected time between two presents.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Forgets the previous tick.
    ///
    /// The next tick reports exactly one refresh interval, so time spent
    /// rebuilding the surface does not show up as a frame delta.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let raw = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => self.interval,
        };
        let dt = raw.clamp(self.dt_min, self.dt_max);

        self.last = Some(now);

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
            late: raw > self.interval.mul_f32(1.5),
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::for_refresh_rate(60)
    }
}
