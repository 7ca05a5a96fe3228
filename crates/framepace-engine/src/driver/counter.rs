/// Frames-per-window counter.
///
/// `frames` counts rendered frames in the open window and only grows until the next
/// `sample`. `last_sample` only changes in `sample`, so it always holds a complete
/// window (0 before the first boundary).
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    last_sample: u32,
    windows: u64,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }

    /// Closes the current window: captures the count, then resets it to zero.
    pub fn sample(&mut self) -> u32 {
        self.last_sample = self.frames;
        self.frames = 0;
        self.windows += 1;
        self.last_sample
    }

    /// Frames counted in the last completed window.
    pub fn last_sample(&self) -> u32 {
        self.last_sample
    }

    /// Frames counted so far in the open window.
    pub fn in_window(&self) -> u32 {
        self.frames
    }

    /// Number of completed windows.
    pub fn windows(&self) -> u64 {
        self.windows
    }
}
