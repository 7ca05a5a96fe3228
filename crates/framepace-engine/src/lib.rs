//! framepace engine crate.
//!
//! Drives an opaque scene once per display refresh and reports frames per second.
//! Startup is two-phase: `loader::EngineLoader` brings the engine online and seeds a
//! scene, then `driver::FrameDriver` runs it from a host (`window::Runtime`, or
//! `host::VirtualHost` under a virtual clock).

pub mod config;
pub mod display;
pub mod driver;
pub mod error;
pub mod host;
pub mod loader;
pub mod logging;
pub mod scene;
pub mod time;
pub mod window;
