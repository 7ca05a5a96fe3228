//! Driver configuration.
//!
//! Plain structs with `Default`; the window and logging settings live next to the
//! code that consumes them and are re-exported here.

use std::time::Duration;

use crate::scene::Payload;

pub use crate::logging::LoggingConfig;
pub use crate::window::RuntimeConfig;

/// FPS sampling window.
pub const DEFAULT_SAMPLE_PERIOD: Duration = Duration::from_millis(1000);

/// What the frame loop does when `advance` or `render` fails mid-loop.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum FaultPolicy {
    /// Log the error, leave the frame uncounted and continue on the next refresh.
    ///
    /// Skipped frames never reach the FPS counter, so a scene that fails every
    /// frame samples 0 while the loop keeps running.
    #[default]
    Skip,
    /// Stop driving the scene; the host exits its loop.
    Halt,
}

#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub sample_period: Duration,
    pub fault_policy: FaultPolicy,
    pub payload: Payload,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            sample_period: DEFAULT_SAMPLE_PERIOD,
            fault_policy: FaultPolicy::Skip,
            payload: Payload::default(),
        }
    }
}
