use std::time::{Duration, Instant};

use super::{Pacer, Sample};
use crate::config::DriverConfig;
use crate::display::DisplaySurface;
use crate::driver::{FrameDriver, FrameOutcome};
use crate::loader::Ready;
use crate::scene::Scene;

/// Single-threaded host driven by an explicit virtual clock.
///
/// Time only moves through `advance_by`/`advance_to`. Every timer deadline crossed on
/// the way fires at its own instant, before anything scheduled later. A refresh at
/// exactly a deadline therefore lands in the new window.
pub struct VirtualHost<S, D> {
    origin: Instant,
    now: Instant,
    pacer: Pacer<S, D>,
    refresh_armed: bool,
    samples: Vec<(Duration, u32)>,
}

impl<S, D> VirtualHost<S, D>
where
    S: Scene,
    D: DisplaySurface,
{
    /// System start: the sample timer is armed immediately, the frame loop is not.
    pub fn new(config: &DriverConfig) -> Self {
        let origin = Instant::now();
        Self {
            origin,
            now: origin,
            pacer: Pacer::new(config, origin),
            refresh_armed: false,
            samples: Vec::new(),
        }
    }

    /// Hands the loaded scene to the driver. Later refreshes drive it.
    pub fn start(&mut self, ready: Ready<S, D>) -> anyhow::Result<()> {
        let late = self.pacer.start(ready, self.now)?;
        self.record(late);
        Ok(())
    }

    /// Virtual time since system start.
    pub fn elapsed(&self) -> Duration {
        self.now - self.origin
    }

    pub fn advance_by(&mut self, step: Duration) {
        let target = self.elapsed() + step;
        self.advance_to(target);
    }

    /// Moves the clock to `origin + at`, firing every due timer on the way.
    pub fn advance_to(&mut self, at: Duration) {
        let target = self.origin + at;
        debug_assert!(target >= self.now, "virtual time cannot go backwards");

        while self.pacer.deadline() <= target {
            self.now = self.pacer.deadline();
            let sample = self.pacer.poll_timer(self.now);
            self.record(sample);
        }
        self.now = self.now.max(target);
    }

    /// Delivers one display refresh at the current virtual instant.
    pub fn refresh(&mut self) -> FrameOutcome {
        self.refresh_armed = false;
        let armed = &mut self.refresh_armed;
        self.pacer.on_refresh(self.now, || *armed = true)
    }

    /// Delivers `count` refreshes spaced `interval` apart, starting now.
    ///
    /// The clock ends one `interval` after the last refresh.
    pub fn run_refreshes(&mut self, count: usize, interval: Duration) {
        for _ in 0..count {
            self.refresh();
            self.advance_by(interval);
        }
    }

    /// Whether the last refresh requested another one.
    pub fn refresh_armed(&self) -> bool {
        self.refresh_armed
    }

    pub fn driver(&self) -> &FrameDriver<S, D> {
        self.pacer.driver()
    }

    /// Every sample taken so far as `(fired at, fps)`.
    pub fn samples(&self) -> &[(Duration, u32)] {
        &self.samples
    }

    /// Frames the host has delivered to a running scene.
    pub fn frames_delivered(&self) -> u64 {
        self.pacer.frames()
    }

    fn record(&mut self, sample: Option<Sample>) {
        if let Some(sample) = sample {
            self.samples.push((sample.at - self.origin, sample.fps));
        }
    }
}
