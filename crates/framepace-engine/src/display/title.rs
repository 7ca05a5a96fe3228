use std::sync::Arc;

use anyhow::Result;
use winit::window::Window;

use super::DisplaySurface;

/// Display surface backed by the window title.
///
/// The title reads `"<base> | <text>"` once a frame has written to it, and just
/// `"<base>"` before that.
pub struct TitleSurface {
    window: Arc<Window>,
    base: String,
    // Last text pushed to the platform; the title is only touched when it changes.
    shown: Option<String>,
}

impl TitleSurface {
    pub fn new(window: Arc<Window>, base: impl Into<String>) -> Self {
        Self {
            window,
            base: base.into(),
            shown: None,
        }
    }
}

impl DisplaySurface for TitleSurface {
    fn attach(&mut self) -> Result<()> {
        self.window.set_title(&self.base);
        self.window.set_visible(true);
        Ok(())
    }

    fn set_text(&mut self, text: &str) {
        if self.shown.as_deref() == Some(text) {
            return;
        }
        self.window.set_title(&format!("{} | {}", self.base, text));
        self.shown = Some(text.to_owned());
    }
}
