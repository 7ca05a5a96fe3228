use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, clamped.
    pub dt: Duration,

    /// Timestamp the tick was taken at.
    pub now: Instant,

    /// Index of this tick, starting at 0.
    pub frame_index: u64,
}

/// Clamped delta-time clock, ticked once per refresh.
///
/// The caller supplies the instant, so a host with a virtual clock gets the same
/// behaviour as one reading `Instant::now()`.
///
/// Delta time is clamped: the minimum keeps zero-length ticks from tight loops out of
/// downstream math, the maximum hides long stalls (debugger, minimized window).
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self::with_clamps(now, Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(now: Instant, dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Moves the baseline without counting a tick.
    ///
    /// Used once the loader completes so init time does not show up as the first
    /// frame's delta.
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }

    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt,
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }

    /// Number of ticks taken so far.
    pub fn frames(&self) -> u64 {
        self.frame_index
    }
}
