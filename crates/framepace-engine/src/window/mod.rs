//! Windowed host built on winit.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
