use std::time::{Duration, Instant};

use crate::config::DriverConfig;
use crate::display::DisplaySurface;
use crate::driver::{DriverState, FrameDriver, FrameOutcome};
use crate::loader::Ready;
use crate::scene::Scene;
use crate::time::{FrameClock, SampleTimer};

/// One closed sampling window.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Sample {
    pub fps: u32,
    /// Longest clamped frame delta seen in the window; zero if no frame ran.
    pub worst_frame: Duration,
    pub at: Instant,
}

/// The cooperative schedule both hosts run: one frame per refresh, one sample per
/// timer deadline.
///
/// A host owns the real or virtual clock and the refresh source; it hands every
/// refresh to `on_refresh` and checks `poll_timer` whenever it regains control.
/// The sample timer is armed at construction, which is system start, so it runs
/// while the loader is still working.
pub struct Pacer<S, D> {
    driver: FrameDriver<S, D>,
    timer: SampleTimer,
    clock: FrameClock,
    worst_frame: Duration,
}

impl<S, D> Pacer<S, D>
where
    S: Scene,
    D: DisplaySurface,
{
    pub fn new(config: &DriverConfig, now: Instant) -> Self {
        Self {
            driver: FrameDriver::new(config),
            timer: SampleTimer::start(now, config.sample_period),
            clock: FrameClock::new(now),
            worst_frame: Duration::ZERO,
        }
    }

    /// Starts the frame loop at `now`.
    ///
    /// A host that blocked on the loader could not fire the timer in the meantime.
    /// An expired deadline is fired here, before the driver starts, so that window
    /// closes with the zero frames it actually saw.
    pub fn start(&mut self, ready: Ready<S, D>, now: Instant) -> anyhow::Result<Option<Sample>> {
        let late = self.poll_timer(now);
        self.driver.start(ready)?;
        self.clock.reset(now);
        Ok(late)
    }

    /// Runs one refresh at `now`.
    ///
    /// While the driver is running, `rearm` is called first so the next refresh is
    /// already requested when the frame body runs. Before start and after a halt
    /// nothing is re-armed.
    pub fn on_refresh(&mut self, now: Instant, rearm: impl FnOnce()) -> FrameOutcome {
        if self.driver.state() == DriverState::Running {
            rearm();
        }

        let outcome = self.driver.frame();
        if matches!(outcome, FrameOutcome::Rendered | FrameOutcome::Skipped) {
            let ft = self.clock.tick(now);
            self.worst_frame = self.worst_frame.max(ft.dt);
            log::trace!("frame {} dt={:?}", ft.frame_index, ft.dt);
        }
        outcome
    }

    /// Fires the sample timer if its deadline has passed.
    pub fn poll_timer(&mut self, now: Instant) -> Option<Sample> {
        if !self.timer.fire(now) {
            return None;
        }

        let fps = self.driver.sample();
        let worst_frame = std::mem::take(&mut self.worst_frame);
        log::debug!(
            "fps sample {fps} (window {}, worst frame {worst_frame:?})",
            self.driver.counter().windows()
        );

        Some(Sample {
            fps,
            worst_frame,
            at: now,
        })
    }

    /// When the sample timer next needs the host.
    pub fn deadline(&self) -> Instant {
        self.timer.deadline()
    }

    pub fn driver(&self) -> &FrameDriver<S, D> {
        &self.driver
    }

    /// Frames delivered to a running scene, counted or skipped.
    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    pub fn samples_taken(&self) -> u64 {
        self.timer.fired()
    }
}
