use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use super::DisplaySurface;

#[derive(Debug, Default)]
struct MemoryState {
    attached: bool,
    text: String,
    writes: u64,
}

/// In-memory display surface.
///
/// Clones share the same state, so a test can keep a handle while the driver owns
/// another one.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    state: Rc<RefCell<MemoryState>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    /// Current text. Empty until the first frame writes to it.
    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    /// Number of `set_text` calls since creation.
    pub fn writes(&self) -> u64 {
        self.state.borrow().writes
    }
}

impl DisplaySurface for MemorySurface {
    fn attach(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        anyhow::ensure!(!state.attached, "display surface is already attached");
        state.attached = true;
        Ok(())
    }

    fn set_text(&mut self, text: &str) {
        let mut state = self.state.borrow_mut();
        state.text.clear();
        state.text.push_str(text);
        state.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_detached_and_empty() {
        let surface = MemorySurface::new();
        assert!(!surface.is_attached());
        assert_eq!(surface.text(), "");
        assert_eq!(surface.writes(), 0);
    }

    #[test]
    fn clones_observe_writes() {
        let observer = MemorySurface::new();
        let mut owned = observer.clone();

        owned.attach().unwrap();
        owned.set_text("fps is 3");
        owned.set_text("fps is 4");

        assert!(observer.is_attached());
        assert_eq!(observer.text(), "fps is 4");
        assert_eq!(observer.writes(), 2);
    }

    #[test]
    fn attach_twice_is_rejected() {
        let mut surface = MemorySurface::new();
        surface.attach().unwrap();
        assert!(surface.attach().is_err());
    }
}
