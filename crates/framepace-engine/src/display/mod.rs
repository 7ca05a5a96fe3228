//! FPS display surfaces.
//!
//! A display surface is the single visible element carrying the FPS reading. It is
//! attached once at startup and its text is overwritten every frame.

mod memory;
mod title;

pub use memory::MemorySurface;
pub use title::TitleSurface;

use anyhow::Result;

/// Single output element showing the last completed FPS sample.
pub trait DisplaySurface {
    /// Makes the surface visible. Called once, before any frame is drawn.
    fn attach(&mut self) -> Result<()>;

    /// Overwrites the surface text.
    fn set_text(&mut self, text: &str);
}

/// Human-readable text written to the display surface.
pub fn fps_label(fps: u32) -> String {
    format!("fps is {fps}")
}
