//! Time subsystem.
//!
//! Both types take the current instant as an argument instead of reading the system
//! clock, which keeps them usable under a virtual clock.
//! - `FrameClock`: one per frame loop, ticked once per refresh
//! - `SampleTimer`: the self re-arming FPS sampling deadline

mod frame_clock;
mod sample_timer;

pub use frame_clock::{FrameClock, FrameTime};
pub use sample_timer::SampleTimer;
