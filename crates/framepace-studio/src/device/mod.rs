//! The demo engine's GPU backend: device, queue and the window surface.
//!
//! This sits behind the `Engine` boundary; the frame driver never sees it.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
