//! Frame driver.
//!
//! Owns everything the two repeating activities share: the scene, the display surface
//! and the FPS counter. The host calls `frame` once per display refresh (after
//! re-arming the next refresh) and `sample` every time its sample timer fires. Both
//! run on the host's single thread, so plain `&mut self` access is enough.

mod counter;

pub use counter::FpsCounter;

use anyhow::Context;

use crate::config::{DriverConfig, FaultPolicy};
use crate::display::{fps_label, DisplaySurface};
use crate::loader::Ready;
use crate::scene::Scene;

/// Lifecycle of a `FrameDriver`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DriverState {
    /// Waiting for the loader; frame ticks are ignored.
    Uninitialized,
    /// Driving the scene every refresh.
    Running,
    /// Stopped after a scene failure under `FaultPolicy::Halt`.
    Halted,
}

/// Result of one frame tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// The driver has not been started.
    NotStarted,
    /// Advanced, rendered and counted.
    Rendered,
    /// A scene call failed; the frame was not counted.
    Skipped,
    /// The driver is halted. The host should leave its loop.
    Halted,
}

enum Stage<S, D> {
    Uninitialized,
    Running(Ready<S, D>),
    Halted(Ready<S, D>),
}

pub struct FrameDriver<S, D> {
    policy: FaultPolicy,
    counter: FpsCounter,
    stage: Stage<S, D>,
}

impl<S, D> FrameDriver<S, D>
where
    S: Scene,
    D: DisplaySurface,
{
    pub fn new(config: &DriverConfig) -> Self {
        Self {
            policy: config.fault_policy,
            counter: FpsCounter::new(),
            stage: Stage::Uninitialized,
        }
    }

    pub fn state(&self) -> DriverState {
        match self.stage {
            Stage::Uninitialized => DriverState::Uninitialized,
            Stage::Running(_) => DriverState::Running,
            Stage::Halted(_) => DriverState::Halted,
        }
    }

    /// Moves `Uninitialized → Running`. Only valid once.
    pub fn start(&mut self, ready: Ready<S, D>) -> anyhow::Result<()> {
        anyhow::ensure!(
            matches!(self.stage, Stage::Uninitialized),
            "frame driver already started"
        );
        self.stage = Stage::Running(ready);
        log::info!("frame loop running");
        Ok(())
    }

    /// Runs one frame: advance, render, count, then refresh the display.
    pub fn frame(&mut self) -> FrameOutcome {
        let ready = match &mut self.stage {
            Stage::Running(ready) => ready,
            Stage::Halted(_) => return FrameOutcome::Halted,
            Stage::Uninitialized => return FrameOutcome::NotStarted,
        };

        // A failed advance must not be followed by a render of stale state.
        let result = ready
            .scene
            .advance()
            .context("scene advance failed")
            .and_then(|()| ready.scene.render().context("scene render failed"));

        let outcome = match result {
            Ok(()) => {
                self.counter.record_frame();
                FrameOutcome::Rendered
            }
            Err(e) => match self.policy {
                FaultPolicy::Skip => {
                    log::warn!("frame skipped: {e:#}");
                    FrameOutcome::Skipped
                }
                FaultPolicy::Halt => {
                    log::error!("frame loop halted: {e:#}");
                    FrameOutcome::Halted
                }
            },
        };

        ready.surface.set_text(&fps_label(self.counter.last_sample()));

        if outcome == FrameOutcome::Halted {
            if let Stage::Running(ready) = std::mem::replace(&mut self.stage, Stage::Uninitialized) {
                self.stage = Stage::Halted(ready);
            }
        }

        outcome
    }

    /// Closes the current sampling window. Valid in every state.
    pub fn sample(&mut self) -> u32 {
        self.counter.sample()
    }

    pub fn counter(&self) -> &FpsCounter {
        &self.counter
    }

    pub fn ready(&self) -> Option<&Ready<S, D>> {
        match &self.stage {
            Stage::Running(ready) | Stage::Halted(ready) => Some(ready),
            Stage::Uninitialized => None,
        }
    }
}
