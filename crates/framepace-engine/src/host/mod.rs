//! Hosts that schedule the two repeating activities.
//!
//! `Pacer` is the schedule itself. The windowed host in `crate::window` feeds it
//! wall-clock instants from winit; `VirtualHost` replays it against a virtual clock,
//! one activity at a time.

mod pacer;
mod virtual_host;

pub use pacer::{Pacer, Sample};
pub use virtual_host::VirtualHost;
